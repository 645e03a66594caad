//! Core types shared across sysdelta facilities
//!
//! This crate provides the canonical structured-logging schema used by the
//! logging macros and by tests asserting on captured events:
//!
//! - **Schema constants**: canonical field keys and event names

pub mod schema;
