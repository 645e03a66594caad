//! Feature, analyzer and metric threshold reconciliation.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::hash::Hash;

use crate::delta::model::BaselineCurrent;
use crate::model::{MetricThreshold, MetricThresholdId};

/// Set difference in both directions, preserving input order.
///
/// Returns `(added, removed)`; duplicates within one side are reported once.
pub fn set_delta<T: Eq + Hash + Clone>(baseline: &[T], current: &[T]) -> (Vec<T>, Vec<T>) {
    let baseline_set: HashSet<&T> = baseline.iter().collect();
    let current_set: HashSet<&T> = current.iter().collect();

    let mut seen = HashSet::new();
    let added = current
        .iter()
        .filter(|item| !baseline_set.contains(item) && seen.insert(*item))
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let removed = baseline
        .iter()
        .filter(|item| !current_set.contains(item) && seen.insert(*item))
        .cloned()
        .collect();

    (added, removed)
}

/// Metric threshold changes between two snapshots
#[derive(Debug, Default, PartialEq)]
pub struct MetricThresholdDelta {
    pub added: Vec<MetricThreshold>,
    pub removed: Vec<MetricThreshold>,
    pub changed: Vec<BaselineCurrent<MetricThreshold>>,
}

/// Match thresholds by (metric id, level) and compare their bounds.
pub fn reconcile_metric_thresholds(
    baseline: &[MetricThreshold],
    current: &[MetricThreshold],
) -> MetricThresholdDelta {
    let mut remaining: BTreeMap<MetricThresholdId, &MetricThreshold> = BTreeMap::new();
    for threshold in current {
        remaining.entry(threshold.id()).or_insert(threshold);
    }

    let mut delta = MetricThresholdDelta::default();
    let mut seen = BTreeSet::new();
    for threshold in baseline {
        // Only the first threshold of an id takes part
        if !seen.insert(threshold.id()) {
            continue;
        }
        match remaining.remove(&threshold.id()) {
            Some(next) if threshold.bounds_differ(next) => delta
                .changed
                .push(BaselineCurrent::new(threshold.clone(), next.clone())),
            Some(_) => {}
            None => delta.removed.push(threshold.clone()),
        }
    }

    for threshold in current {
        if remaining.remove(&threshold.id()).is_some() {
            delta.added.push(threshold.clone());
        }
    }
    delta
}
