//! Delta output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Keyed collections use `BTreeMap`; lists follow deterministic bucket order.

use crate::model::{
    Analyzer, Feature, Issue, MetricThreshold, Module, RootDirectory, SingleElementIssue,
    SystemInfo,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current schema version of [`ReportDelta`]
pub const DELTA_SCHEMA_VERSION: u32 = 1;

/// The same entity (or count) as seen in baseline and current
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaselineCurrent<T> {
    pub baseline: T,
    pub current: T,
}

impl<T> BaselineCurrent<T> {
    pub fn new(baseline: T, current: T) -> Self {
        Self { baseline, current }
    }
}

/// Composite bucket key: a named element together with an issue key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementIssueKey {
    pub fq_name: String,
    pub issue_key: String,
}

impl ElementIssueKey {
    pub fn new(fq_name: impl Into<String>, issue_key: impl Into<String>) -> Self {
        Self {
            fq_name: fq_name.into(),
            issue_key: issue_key.into(),
        }
    }
}

/// Identity of both snapshots being compared
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeltaIdentity {
    pub baseline: SystemInfo,
    pub current: SystemInfo,
    /// Content digest of the baseline snapshot, when the accessor provides one
    pub baseline_digest: Option<String>,
    /// Content digest of the current snapshot, when the accessor provides one
    pub current_digest: Option<String>,
}

/// Everything that changed about issues
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IssueDelta {
    /// Issues only present in current
    pub added: Vec<Issue>,
    /// Issues only present in baseline
    pub removed: Vec<Issue>,
    /// Matched issues whose resolution type differs
    pub changed_resolution: Vec<BaselineCurrent<Issue>>,
    /// Matched threshold violations that moved back toward their bounds
    pub improved_thresholds: Vec<BaselineCurrent<SingleElementIssue>>,
    /// Matched threshold violations that moved further out of bounds
    pub worsened_thresholds: Vec<BaselineCurrent<SingleElementIssue>>,
    /// Elements that newly participate in a cycle of the given key
    pub added_to_cycle: Vec<ElementIssueKey>,
    /// Elements that no longer participate in a cycle of the given key
    pub removed_from_cycle: Vec<ElementIssueKey>,
    /// Per cycle issue key: participation counts that went down
    pub improved_cycle_participation: BTreeMap<String, BaselineCurrent<usize>>,
    /// Per cycle issue key: participation counts that went up
    pub worsened_cycle_participation: BTreeMap<String, BaselineCurrent<usize>>,
    /// Per source file: number of duplicate blocks it takes part in
    pub changed_duplicate_code_participation: BTreeMap<String, BaselineCurrent<usize>>,
    pub improved_duplicate_code_participation: Option<BaselineCurrent<usize>>,
    pub worsened_duplicate_code_participation: Option<BaselineCurrent<usize>>,
}

impl IssueDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.changed_resolution.is_empty()
            && self.improved_thresholds.is_empty()
            && self.worsened_thresholds.is_empty()
            && self.added_to_cycle.is_empty()
            && self.removed_from_cycle.is_empty()
            && self.improved_cycle_participation.is_empty()
            && self.worsened_cycle_participation.is_empty()
            && self.changed_duplicate_code_participation.is_empty()
            && self.improved_duplicate_code_participation.is_none()
            && self.worsened_duplicate_code_participation.is_none()
    }
}

/// Root directory breakdown of a module whose roots changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleDelta {
    /// The module as it appears in baseline
    pub module: Module,
    pub unchanged: Vec<RootDirectory>,
    pub added: Vec<RootDirectory>,
    pub removed: Vec<RootDirectory>,
}

/// Module-level changes
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkspaceDelta {
    pub added_modules: Vec<Module>,
    pub removed_modules: Vec<Module>,
    pub changed_modules: Vec<ModuleDelta>,
}

impl WorkspaceDelta {
    pub fn is_empty(&self) -> bool {
        self.added_modules.is_empty()
            && self.removed_modules.is_empty()
            && self.changed_modules.is_empty()
    }
}

/// The reconciled difference between a baseline and a current snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDelta {
    /// Schema version of this structure (always [`DELTA_SCHEMA_VERSION`])
    pub delta_schema_version: u32,
    pub identity: DeltaIdentity,
    pub issue_delta: IssueDelta,
    pub workspace_delta: WorkspaceDelta,
    pub added_features: Vec<Feature>,
    pub removed_features: Vec<Feature>,
    pub added_analyzers: Vec<Analyzer>,
    pub removed_analyzers: Vec<Analyzer>,
    pub added_metric_thresholds: Vec<MetricThreshold>,
    pub removed_metric_thresholds: Vec<MetricThreshold>,
    /// Thresholds present in both snapshots whose bounds differ
    pub changed_metric_thresholds: Vec<BaselineCurrent<MetricThreshold>>,
}

impl ReportDelta {
    /// True if nothing at all changed between the two snapshots
    pub fn is_empty(&self) -> bool {
        self.issue_delta.is_empty()
            && self.workspace_delta.is_empty()
            && self.added_features.is_empty()
            && self.removed_features.is_empty()
            && self.added_analyzers.is_empty()
            && self.removed_analyzers.is_empty()
            && self.added_metric_thresholds.is_empty()
            && self.removed_metric_thresholds.is_empty()
            && self.changed_metric_thresholds.is_empty()
    }
}
