//! Single-element issue reconciliation.
//!
//! Issues are bucketed by (element fq_name, effective issue key). Within a
//! bucket, baseline and current issues are first paired by exact position
//! (line and column). What remains is either all added, all removed, or, if
//! both residual lists have the same length, paired by index after sorting.
//! The index pairing keeps line shifts from showing up as add/remove churn.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use crate::delta::builder::IssueDeltaBuilder;
use crate::delta::classify::{IssueBucket, Side};
use crate::delta::model::ElementIssueKey;
use crate::delta::options::DeltaOptions;
use crate::delta::threshold::{threshold_trend, ThresholdTrend};
use crate::errors::{DeltaError, Result};
use crate::model::SingleElementIssue;

/// Order by line, then column, then case-insensitive name.
pub fn compare_single_element_issues(a: &SingleElementIssue, b: &SingleElementIssue) -> Ordering {
    a.line
        .cmp(&b.line)
        .then_with(|| a.column.cmp(&b.column))
        .then_with(|| {
            a.name
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.name.chars().flat_map(char::to_lowercase))
        })
}

/// Reconcile all single-element issues of both snapshots.
///
/// # Errors
///
/// Propagates invariant violations from bucket reconciliation.
pub fn reconcile_single_element_issues(
    baseline: &[&SingleElementIssue],
    current: &[&SingleElementIssue],
    options: &DeltaOptions,
    builder: &mut IssueDeltaBuilder,
) -> Result<()> {
    let mut buckets: BTreeMap<ElementIssueKey, IssueBucket<'_, SingleElementIssue>> =
        BTreeMap::new();
    for (side, issues) in [(Side::Baseline, baseline), (Side::Current, current)] {
        for issue in issues.iter().copied() {
            buckets
                .entry(ElementIssueKey::new(
                    issue.element.fq_name.as_str(),
                    issue.issue_key(),
                ))
                .or_default()
                .push(side, issue);
        }
    }

    let events_before = builder.event_count();
    let bucket_count = buckets.len();
    for (key, bucket) in buckets {
        reconcile_bucket(&key, bucket, options, builder)?;
    }

    debug!(
        component = module_path!(),
        op = "reconcile_single_element_issues",
        baseline = baseline.len(),
        current = current.len(),
        buckets = bucket_count,
        events = builder.event_count() - events_before,
    );
    Ok(())
}

fn reconcile_bucket(
    key: &ElementIssueKey,
    bucket: IssueBucket<'_, SingleElementIssue>,
    options: &DeltaOptions,
    builder: &mut IssueDeltaBuilder,
) -> Result<()> {
    bucket.ensure_non_empty(&key.fq_name, &key.issue_key)?;

    let IssueBucket {
        mut baseline,
        mut current,
    } = bucket;
    // Stable sort: full ties keep snapshot order.
    baseline.sort_by(|a, b| compare_single_element_issues(a, b));
    current.sort_by(|a, b| compare_single_element_issues(a, b));

    let mut unmatched_current = Vec::with_capacity(current.len());
    for next in current {
        match baseline
            .iter()
            .position(|b| b.line == next.line && b.column == next.column)
        {
            Some(index) => {
                let matched = baseline.remove(index);
                process_matching_issue(matched, next, options, builder)?;
            }
            None => unmatched_current.push(next),
        }
    }
    let current = unmatched_current;

    if baseline.is_empty() {
        current.into_iter().for_each(|i| builder.added(i.clone()));
    } else if current.is_empty() {
        baseline.into_iter().for_each(|i| builder.removed(i.clone()));
    } else if baseline.len() != current.len() {
        baseline.into_iter().for_each(|i| builder.removed(i.clone()));
        current.into_iter().for_each(|i| builder.added(i.clone()));
    } else {
        for (b, c) in baseline.into_iter().zip(current) {
            process_matching_issue(b, c, options, builder)?;
        }
    }
    Ok(())
}

/// Record what changed between two issues considered the same.
///
/// Emits a resolution change if the resolution types differ and, for
/// threshold violations, an improved or worsened trend.
///
/// # Errors
///
/// `MismatchedThresholdPair` if only one side is a threshold violation.
pub fn process_matching_issue(
    baseline: &SingleElementIssue,
    current: &SingleElementIssue,
    options: &DeltaOptions,
    builder: &mut IssueDeltaBuilder,
) -> Result<()> {
    if baseline.resolution != current.resolution {
        builder.changed_resolution(baseline.clone(), current.clone());
    }

    match (&baseline.threshold, &current.threshold) {
        (None, None) => Ok(()),
        (Some(b), Some(c)) => {
            match threshold_trend(
                b.metric_value,
                c.metric_value,
                &b.threshold,
                options.threshold_precision,
            ) {
                Some(ThresholdTrend::Improved) => builder.improved_threshold(baseline, current),
                Some(ThresholdTrend::Worsened) => builder.worsened_threshold(baseline, current),
                None => {}
            }
            Ok(())
        }
        _ => Err(DeltaError::MismatchedThresholdPair {
            fq_name: current.element.fq_name.clone(),
            issue_key: current.issue_key(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Issue, MetricThreshold, NamedElement, ResolutionType};

    fn element() -> NamedElement {
        NamedElement::new("Workspace:core:Foo.java", "Foo.java")
    }

    fn todo(line: i32, column: i32) -> SingleElementIssue {
        SingleElementIssue::new("Todo", "TODO", element(), line, column)
    }

    fn reconcile(
        baseline: &[SingleElementIssue],
        current: &[SingleElementIssue],
    ) -> crate::delta::model::IssueDelta {
        let b: Vec<&SingleElementIssue> = baseline.iter().collect();
        let c: Vec<&SingleElementIssue> = current.iter().collect();
        let mut builder = IssueDeltaBuilder::new();
        reconcile_single_element_issues(&b, &c, &DeltaOptions::default(), &mut builder).unwrap();
        builder.finish()
    }

    #[test]
    fn test_comparator_orders_line_column_name() {
        let a = SingleElementIssue::new("K", "beta", element(), 1, 5);
        let b = SingleElementIssue::new("K", "Alpha", element(), 1, 5);
        let c = SingleElementIssue::new("K", "alpha", element(), 1, 2);
        assert_eq!(compare_single_element_issues(&b, &a), Ordering::Less);
        assert_eq!(compare_single_element_issues(&c, &b), Ordering::Less);
        let upper = SingleElementIssue::new("K", "ALPHA", element(), 1, 5);
        assert_eq!(compare_single_element_issues(&b, &upper), Ordering::Equal);
    }

    #[test]
    fn test_identical_positions_are_unchanged() {
        let delta = reconcile(&[todo(3, 1), todo(7, 1)], &[todo(3, 1), todo(7, 1)]);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_shifted_lines_pair_by_index() {
        let delta = reconcile(&[todo(3, 1), todo(7, 1)], &[todo(5, 1), todo(9, 1)]);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_unequal_residuals_are_added_and_removed() {
        let delta = reconcile(&[todo(3, 1)], &[todo(5, 1), todo(9, 1)]);
        assert_eq!(delta.removed, vec![Issue::from(todo(3, 1))]);
        assert_eq!(
            delta.added,
            vec![Issue::from(todo(5, 1)), Issue::from(todo(9, 1))]
        );
    }

    #[test]
    fn test_positional_match_takes_precedence() {
        // 7:1 matches exactly; 3:1 and 4:1 are left over and paired.
        let baseline = [todo(3, 1), todo(7, 1).with_resolution(ResolutionType::Todo)];
        let current = [todo(4, 1), todo(7, 1).with_resolution(ResolutionType::Fixed)];
        let delta = reconcile(&baseline, &current);
        assert!(delta.added.is_empty());
        assert!(delta.removed.is_empty());
        assert_eq!(delta.changed_resolution.len(), 1);
        assert_eq!(
            delta.changed_resolution[0].current.resolution(),
            ResolutionType::Fixed
        );
    }

    #[test]
    fn test_different_elements_never_pair() {
        let other = SingleElementIssue::new("Todo", "TODO", NamedElement::new("Bar", "Bar"), 3, 1);
        let delta = reconcile(&[todo(3, 1)], &[other.clone()]);
        assert_eq!(delta.added, vec![Issue::from(other)]);
        assert_eq!(delta.removed.len(), 1);
    }

    #[test]
    fn test_threshold_trend_reported_for_matched_pair() {
        let threshold = MetricThreshold::new("CoreLinesOfCode", "SourceFile", 0.0, 750.0);
        let base = SingleElementIssue::new("ThresholdViolation", "LOC", element(), 1, 0)
            .with_threshold(900.0, threshold.clone());
        let cur = SingleElementIssue::new("ThresholdViolation", "LOC", element(), 1, 0)
            .with_threshold(800.0, threshold);
        let delta = reconcile(&[base], &[cur]);
        assert_eq!(delta.improved_thresholds.len(), 1);
        assert!(delta.worsened_thresholds.is_empty());
    }

    #[test]
    fn test_mismatched_threshold_pair_is_error() {
        let threshold = MetricThreshold::new("CoreLinesOfCode", "SourceFile", 0.0, 750.0);
        let base = todo(1, 0);
        let cur = todo(1, 0).with_threshold(800.0, threshold);
        let mut builder = IssueDeltaBuilder::new();
        let err =
            process_matching_issue(&base, &cur, &DeltaOptions::default(), &mut builder).unwrap_err();
        assert!(matches!(err, DeltaError::MismatchedThresholdPair { .. }));
    }
}
