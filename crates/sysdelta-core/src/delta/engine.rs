//! Report delta assembly.
//!
//! Pure: reads both snapshots through [`SnapshotAccess`] and never mutates
//! them. The same inputs always produce the same output.

use crate::delta::builder::IssueDeltaBuilder;
use crate::delta::classify::classify_issues;
use crate::delta::definitions::{reconcile_metric_thresholds, set_delta};
use crate::delta::model::{DeltaIdentity, IssueDelta, ReportDelta, DELTA_SCHEMA_VERSION};
use crate::delta::multi::reconcile_multi_element_issues;
use crate::delta::options::DeltaOptions;
use crate::delta::single::reconcile_single_element_issues;
use crate::delta::workspace::reconcile_workspace;
use crate::errors::{ExError, Result};
use crate::model::Issue;
use crate::snapshot::{IssueFilter, SnapshotAccess};
use crate::{log_op_end, log_op_error, log_op_start};

/// Compute the delta between two snapshots with default options.
///
/// # Errors
///
/// - `InvariantViolation` if reconciliation finds an inconsistent bucket
///   (e.g. a cycle participant present on both sides with different counts)
/// - `Serialization` if a snapshot digest cannot be computed
pub fn compute_delta<B, C>(baseline: &B, current: &C) -> std::result::Result<ReportDelta, ExError>
where
    B: SnapshotAccess + ?Sized,
    C: SnapshotAccess + ?Sized,
{
    compute_delta_with_options(baseline, current, &DeltaOptions::default())
}

/// Compute the delta between two snapshots.
///
/// # Errors
///
/// As [`compute_delta`], plus `InvalidInput` if `options` fail validation.
pub fn compute_delta_with_options<B, C>(
    baseline: &B,
    current: &C,
    options: &DeltaOptions,
) -> std::result::Result<ReportDelta, ExError>
where
    B: SnapshotAccess + ?Sized,
    C: SnapshotAccess + ?Sized,
{
    log_op_start!(
        "compute_delta",
        baseline_system = %baseline.system().system_id,
        current_system = %current.system().system_id,
    );
    let start = std::time::Instant::now();

    let result = assemble(baseline, current, options);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(delta) => {
            log_op_end!(
                "compute_delta",
                duration_ms = duration_ms,
                empty = delta.is_empty(),
                added = delta.issue_delta.added.len(),
                removed = delta.issue_delta.removed.len(),
            );
        }
        Err(e) => {
            log_op_error!("compute_delta", e.clone(), duration_ms = duration_ms);
        }
    }

    result.map_err(ExError::from)
}

fn assemble<B, C>(baseline: &B, current: &C, options: &DeltaOptions) -> Result<ReportDelta>
where
    B: SnapshotAccess + ?Sized,
    C: SnapshotAccess + ?Sized,
{
    options.validate()?;

    let identity = DeltaIdentity {
        baseline: baseline.system().clone(),
        current: current.system().clone(),
        baseline_digest: baseline.content_digest()?,
        current_digest: current.content_digest()?,
    };

    let issue_delta = compute_issue_delta(baseline, current, options)?;
    let workspace_delta = reconcile_workspace(baseline.modules(), current.modules());

    let (added_features, removed_features) = set_delta(baseline.features(), current.features());
    let (added_analyzers, removed_analyzers) =
        set_delta(baseline.analyzers(), current.analyzers());
    let thresholds =
        reconcile_metric_thresholds(baseline.metric_thresholds(), current.metric_thresholds());

    Ok(ReportDelta {
        delta_schema_version: DELTA_SCHEMA_VERSION,
        identity,
        issue_delta,
        workspace_delta,
        added_features,
        removed_features,
        added_analyzers,
        removed_analyzers,
        added_metric_thresholds: thresholds.added,
        removed_metric_thresholds: thresholds.removed,
        changed_metric_thresholds: thresholds.changed,
    })
}

/// Reconcile all issues of both snapshots.
///
/// # Errors
///
/// Propagates invariant violations from the single and multi-element reconcilers.
pub fn compute_issue_delta<B, C>(
    baseline: &B,
    current: &C,
    options: &DeltaOptions,
) -> Result<IssueDelta>
where
    B: SnapshotAccess + ?Sized,
    C: SnapshotAccess + ?Sized,
{
    let include = |issue: &Issue| options.includes(issue);
    let filter: Option<IssueFilter<'_>> = if options.include_resolved {
        None
    } else {
        Some(&include)
    };

    let baseline_issues = baseline.issues(filter);
    let current_issues = current.issues(filter);
    let b = classify_issues(baseline_issues.iter().copied());
    let c = classify_issues(current_issues.iter().copied());

    let mut builder = IssueDeltaBuilder::new();
    reconcile_single_element_issues(&b.single_element, &c.single_element, options, &mut builder)?;
    reconcile_multi_element_issues(&b.cycle_groups, &c.cycle_groups, &mut builder)?;
    reconcile_multi_element_issues(&b.duplicate_code, &c.duplicate_code, &mut builder)?;
    Ok(builder.finish())
}
