//! Delta computation between two snapshots.
//!
//! ## Responsibilities
//!
//! - Reconcile issues of each variant into added, removed and changed events
//! - Detect threshold trends on matched threshold violations
//! - Reconcile modules, features, analyzers and metric thresholds
//! - Assemble everything into one [`ReportDelta`]
//!
//! ## Determinism
//!
//! Buckets are held in `BTreeMap`s and residual lists are stably sorted, so
//! event order depends only on the snapshot contents.
//!
//! ## Non-Responsibilities
//!
//! - Loading snapshots (see [`crate::snapshot`])
//! - Rendering a delta for humans

pub mod builder;
pub mod classify;
pub mod definitions;
pub mod engine;
pub mod model;
pub mod multi;
pub mod options;
pub mod single;
pub mod threshold;
pub mod workspace;

pub use builder::IssueDeltaBuilder;
pub use engine::{compute_delta, compute_delta_with_options, compute_issue_delta};
pub use model::{
    BaselineCurrent, DeltaIdentity, ElementIssueKey, IssueDelta, ModuleDelta, ReportDelta,
    WorkspaceDelta, DELTA_SCHEMA_VERSION,
};
pub use options::DeltaOptions;
pub use threshold::ThresholdTrend;
