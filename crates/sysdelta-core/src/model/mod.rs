pub mod definition;
pub mod element;
pub mod issue;
pub mod system;

pub use definition::{Analyzer, Feature, MetricThreshold, MetricThresholdId};
pub use element::{Module, NamedElement, RootDirectory};
pub use issue::{
    CycleGroupIssue, DuplicateCodeBlockIssue, DuplicateCodeBlockOccurrence, Issue,
    ResolutionType, SingleElementIssue, ThresholdViolation,
};
pub use system::SystemInfo;
