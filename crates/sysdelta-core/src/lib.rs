//! SysDelta Core - snapshot delta engine
//!
//! Compares a baseline and a current analysis snapshot of a software system
//! and reports what changed:
//! - Issues added, removed, or with changed resolution
//! - Threshold violations that improved or worsened
//! - Cycle and duplicate-code participation changes
//! - Modules and root directories added, removed, or changed
//! - Features, analyzers and metric thresholds added, removed, or changed
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use sysdelta_core::model::{NamedElement, SingleElementIssue, SystemInfo};
//! use sysdelta_core::{compute_delta, Snapshot};
//!
//! let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//! let baseline = Snapshot::new(SystemInfo::new("shop", "Shop", ts));
//! let current = Snapshot::new(SystemInfo::new("shop", "Shop", ts)).with_issue(
//!     SingleElementIssue::new("Todo", "TODO", NamedElement::new("pkg.Cart", "Cart"), 12, 4),
//! );
//!
//! let delta = compute_delta(&baseline, &current).unwrap();
//! assert_eq!(delta.issue_delta.added.len(), 1);
//! ```

pub mod delta;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod snapshot;

pub use sysdelta_core_types::schema;

// Re-export commonly used types
pub use delta::{compute_delta, compute_delta_with_options, DeltaOptions, ReportDelta};
pub use errors::{DeltaError, ExError, ExErrorKind, Result};
pub use snapshot::{parse_snapshot_bytes, Snapshot, SnapshotAccess};
