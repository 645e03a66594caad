//! Snapshot access.
//!
//! A snapshot is one fully-loaded analysis run. The delta engine only reads
//! snapshots through [`SnapshotAccess`], so any loader can feed it.
//!
//! ## Responsibilities
//!
//! - Define the accessor contract consumed by the reconcilers
//! - Provide the in-memory [`Snapshot`] implementation and its JSON loader
//! - Compute a content digest used as snapshot identity in deltas
//!
//! ## Non-Responsibilities
//!
//! - Reading the analyzer's XML export format
//! - Persisting user-defined custom metrics

pub mod digest;
pub mod load;

pub use digest::compute_snapshot_digest;
pub use load::parse_snapshot_bytes;

use crate::errors::Result;
use crate::model::{Analyzer, Feature, Issue, MetricThreshold, Module, SystemInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Predicate selecting which issues a caller wants to see
pub type IssueFilter<'f> = &'f dyn Fn(&Issue) -> bool;

/// Read-only view of one analysis run
pub trait SnapshotAccess {
    /// Identity of the analysis run
    fn system(&self) -> &SystemInfo;

    /// Modules keyed by their unique name
    fn modules(&self) -> &BTreeMap<String, Module>;

    /// Issues in snapshot order; `None` returns every issue
    fn issues(&self, filter: Option<IssueFilter<'_>>) -> Vec<&Issue>;

    fn features(&self) -> &[Feature];

    fn analyzers(&self) -> &[Analyzer];

    fn metric_thresholds(&self) -> &[MetricThreshold];

    /// Content digest identifying this exact snapshot, if the implementation
    /// can compute one
    ///
    /// # Errors
    ///
    /// `Serialization` if the snapshot cannot be encoded for hashing.
    fn content_digest(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// In-memory snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub system: SystemInfo,
    /// Persisted as a list of modules, the same shape [`parse_snapshot_bytes`] reads
    #[serde(default, with = "module_list")]
    pub modules: BTreeMap<String, Module>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub analyzers: Vec<Analyzer>,
    #[serde(default)]
    pub metric_thresholds: Vec<MetricThreshold>,
}

mod module_list {
    use crate::model::Module;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        modules: &BTreeMap<String, Module>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(modules.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, Module>, D::Error> {
        let mut modules = BTreeMap::new();
        for module in Vec::<Module>::deserialize(deserializer)? {
            let name = module.name.clone();
            if modules.insert(name.clone(), module).is_some() {
                return Err(D::Error::custom(format!(
                    "Duplicate module in snapshot: {}",
                    name
                )));
            }
        }
        Ok(modules)
    }
}

impl Snapshot {
    /// Create an empty snapshot for the given run
    pub fn new(system: SystemInfo) -> Self {
        Self {
            system,
            modules: BTreeMap::new(),
            issues: Vec::new(),
            features: Vec::new(),
            analyzers: Vec::new(),
            metric_thresholds: Vec::new(),
        }
    }

    /// Add a module; a module with the same name is replaced
    pub fn with_module(mut self, module: Module) -> Self {
        self.modules.insert(module.name.clone(), module);
        self
    }

    pub fn with_issue(mut self, issue: impl Into<Issue>) -> Self {
        self.issues.push(issue.into());
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    pub fn with_metric_threshold(mut self, threshold: MetricThreshold) -> Self {
        self.metric_thresholds.push(threshold);
        self
    }
}

impl SnapshotAccess for Snapshot {
    fn system(&self) -> &SystemInfo {
        &self.system
    }

    fn modules(&self) -> &BTreeMap<String, Module> {
        &self.modules
    }

    fn issues(&self, filter: Option<IssueFilter<'_>>) -> Vec<&Issue> {
        match filter {
            Some(keep) => self.issues.iter().filter(|i| keep(i)).collect(),
            None => self.issues.iter().collect(),
        }
    }

    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn analyzers(&self) -> &[Analyzer] {
        &self.analyzers
    }

    fn metric_thresholds(&self) -> &[MetricThreshold] {
        &self.metric_thresholds
    }

    fn content_digest(&self) -> Result<Option<String>> {
        compute_snapshot_digest(self).map(Some)
    }
}
