//! Snapshot-level definitions: features, analyzers and metric thresholds.
//!
//! Features and analyzers are compared purely by value equality.
//! Metric thresholds are matched by [`MetricThresholdId`] and then compared
//! on their bounds.

use serde::{Deserialize, Serialize};

/// A product feature enabled for the analysis run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    pub presentation_name: String,
    pub licensed: bool,
}

impl Feature {
    pub fn new(name: impl Into<String>, licensed: bool) -> Self {
        let name = name.into();
        Self {
            presentation_name: name.clone(),
            name,
            licensed,
        }
    }
}

/// An analyzer that contributed issues or metrics to the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Analyzer {
    pub id: String,
    pub presentation_name: String,
    #[serde(default)]
    pub description: String,
    pub licensed: bool,
}

impl Analyzer {
    pub fn new(id: impl Into<String>, licensed: bool) -> Self {
        let id = id.into();
        Self {
            presentation_name: id.clone(),
            id,
            description: String::new(),
            licensed,
        }
    }
}

/// Identity of a metric threshold: which metric, at which level
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetricThresholdId {
    pub metric_id: String,
    pub metric_level: String,
}

/// Configured lower/upper bound for one metric at one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricThreshold {
    pub metric_id: String,
    pub metric_level: String,
    pub lower_threshold: f64,
    pub upper_threshold: f64,
}

impl MetricThreshold {
    pub fn new(
        metric_id: impl Into<String>,
        metric_level: impl Into<String>,
        lower_threshold: f64,
        upper_threshold: f64,
    ) -> Self {
        Self {
            metric_id: metric_id.into(),
            metric_level: metric_level.into(),
            lower_threshold,
            upper_threshold,
        }
    }

    /// Matching identity across snapshots
    pub fn id(&self) -> MetricThresholdId {
        MetricThresholdId {
            metric_id: self.metric_id.clone(),
            metric_level: self.metric_level.clone(),
        }
    }

    /// True if either bound differs from `other`.
    ///
    /// Bounds are compared bitwise, so a NaN bound equals itself.
    pub fn bounds_differ(&self, other: &MetricThreshold) -> bool {
        self.lower_threshold.to_bits() != other.lower_threshold.to_bits()
            || self.upper_threshold.to_bits() != other.upper_threshold.to_bits()
    }
}
