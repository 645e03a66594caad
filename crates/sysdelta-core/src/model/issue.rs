//! Issue model.
//!
//! An [`Issue`] is exactly one of three variants. Only derived keys, names
//! and positions identify an issue across snapshots; there is no persistent id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::definition::MetricThreshold;
use super::element::NamedElement;

/// Separator used when extending an issue key with threshold identity
pub const KEY_SEPARATOR: &str = ":";

/// Workflow state of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionType {
    #[default]
    None,
    Todo,
    Fixed,
    Ignored,
    Refactoring,
}

impl ResolutionType {
    /// Fixed and ignored issues no longer require attention
    pub fn is_resolved(self) -> bool {
        matches!(self, ResolutionType::Fixed | ResolutionType::Ignored)
    }
}

/// Metric value that fell outside its configured threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdViolation {
    pub metric_value: f64,
    pub threshold: MetricThreshold,
}

/// Issue bound to exactly one named element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleElementIssue {
    /// Classification key, independent of position
    pub key: String,
    pub name: String,
    pub element: NamedElement,
    pub line: i32,
    pub column: i32,
    #[serde(default)]
    pub resolution: ResolutionType,
    /// Present when the issue is a threshold violation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<ThresholdViolation>,
}

impl SingleElementIssue {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        element: NamedElement,
        line: i32,
        column: i32,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            element,
            line,
            column,
            resolution: ResolutionType::None,
            threshold: None,
        }
    }

    pub fn with_resolution(mut self, resolution: ResolutionType) -> Self {
        self.resolution = resolution;
        self
    }

    /// Turn this issue into a threshold violation
    pub fn with_threshold(mut self, metric_value: f64, threshold: MetricThreshold) -> Self {
        self.threshold = Some(ThresholdViolation {
            metric_value,
            threshold,
        });
        self
    }

    pub fn is_threshold_violation(&self) -> bool {
        self.threshold.is_some()
    }

    /// Effective key used for matching.
    ///
    /// Threshold violations append metric id and level so that violations of
    /// different metrics on the same element land in different buckets.
    pub fn issue_key(&self) -> String {
        match &self.threshold {
            Some(violation) => [
                self.key.as_str(),
                violation.threshold.metric_id.as_str(),
                violation.threshold.metric_level.as_str(),
            ]
            .join(KEY_SEPARATOR),
            None => self.key.clone(),
        }
    }
}

/// A set of elements forming a circular dependency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleGroupIssue {
    pub key: String,
    /// Uniquely identifies the cycle across snapshots
    pub name: String,
    #[serde(default)]
    pub resolution: ResolutionType,
    #[serde(default)]
    pub analyzer_id: String,
    /// Cycle participants
    pub elements: Vec<NamedElement>,
}

impl CycleGroupIssue {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        elements: Vec<NamedElement>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            resolution: ResolutionType::None,
            analyzer_id: String::new(),
            elements,
        }
    }

    pub fn with_resolution(mut self, resolution: ResolutionType) -> Self {
        self.resolution = resolution;
        self
    }

    /// Distinct participants by fq_name, in first-occurrence order
    pub fn named_elements(&self) -> Vec<&NamedElement> {
        let mut seen = BTreeSet::new();
        self.elements
            .iter()
            .filter(|e| seen.insert(e.fq_name.as_str()))
            .collect()
    }
}

/// One place where a duplicated block occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateCodeBlockOccurrence {
    pub source_file: NamedElement,
    pub start_line: i32,
    pub block_size: u32,
    #[serde(default)]
    pub tolerance: u32,
}

impl DuplicateCodeBlockOccurrence {
    pub fn new(source_file: NamedElement, start_line: i32, block_size: u32) -> Self {
        Self {
            source_file,
            start_line,
            block_size,
            tolerance: 0,
        }
    }
}

/// A block of near-identical code found in several places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateCodeBlockIssue {
    pub key: String,
    /// Uniquely identifies the duplicate block across snapshots
    pub name: String,
    #[serde(default)]
    pub resolution: ResolutionType,
    pub block_size: u32,
    pub occurrences: Vec<DuplicateCodeBlockOccurrence>,
}

impl DuplicateCodeBlockIssue {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        block_size: u32,
        occurrences: Vec<DuplicateCodeBlockOccurrence>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            resolution: ResolutionType::None,
            block_size,
            occurrences,
        }
    }

    pub fn with_resolution(mut self, resolution: ResolutionType) -> Self {
        self.resolution = resolution;
        self
    }

    /// Distinct source files among the occurrences, in first-occurrence order
    pub fn named_elements(&self) -> Vec<&NamedElement> {
        let mut seen = BTreeSet::new();
        self.occurrences
            .iter()
            .map(|o| &o.source_file)
            .filter(|f| seen.insert(f.fq_name.as_str()))
            .collect()
    }
}

/// A static-analysis issue of one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum Issue {
    SingleElement(SingleElementIssue),
    CycleGroup(CycleGroupIssue),
    DuplicateCodeBlock(DuplicateCodeBlockIssue),
}

impl Issue {
    pub fn name(&self) -> &str {
        match self {
            Issue::SingleElement(i) => &i.name,
            Issue::CycleGroup(i) => &i.name,
            Issue::DuplicateCodeBlock(i) => &i.name,
        }
    }

    /// Effective matching key (see [`SingleElementIssue::issue_key`])
    pub fn issue_key(&self) -> String {
        match self {
            Issue::SingleElement(i) => i.issue_key(),
            Issue::CycleGroup(i) => i.key.clone(),
            Issue::DuplicateCodeBlock(i) => i.key.clone(),
        }
    }

    pub fn resolution(&self) -> ResolutionType {
        match self {
            Issue::SingleElement(i) => i.resolution,
            Issue::CycleGroup(i) => i.resolution,
            Issue::DuplicateCodeBlock(i) => i.resolution,
        }
    }
}

impl From<SingleElementIssue> for Issue {
    fn from(issue: SingleElementIssue) -> Self {
        Issue::SingleElement(issue)
    }
}

impl From<CycleGroupIssue> for Issue {
    fn from(issue: CycleGroupIssue) -> Self {
        Issue::CycleGroup(issue)
    }
}

impl From<DuplicateCodeBlockIssue> for Issue {
    fn from(issue: DuplicateCodeBlockIssue) -> Self {
        Issue::DuplicateCodeBlock(issue)
    }
}
