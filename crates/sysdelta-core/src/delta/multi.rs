//! Multi-element issue reconciliation (cycle groups, duplicate code blocks).
//!
//! Two views are reconciled independently:
//!
//! - identity: issues with the same name are the same issue; only resolution
//!   changes are reported
//! - membership: per (participant fq_name, issue key), the number of issues
//!   the participant takes part in is compared between snapshots

use std::collections::BTreeMap;

use tracing::debug;

use crate::delta::builder::IssueDeltaBuilder;
use crate::delta::classify::{IssueBucket, Side};
use crate::delta::model::{BaselineCurrent, ElementIssueKey};
use crate::errors::{DeltaError, Result};
use crate::model::{
    CycleGroupIssue, DuplicateCodeBlockIssue, Issue, NamedElement, ResolutionType,
};

/// Which membership semantics apply to a multi-element issue type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiElementKind {
    CycleGroup,
    DuplicateCode,
}

/// An issue that involves several named elements
pub trait MultiElementIssue: Clone + Into<Issue> {
    const KIND: MultiElementKind;

    fn name(&self) -> &str;

    fn key(&self) -> &str;

    fn resolution(&self) -> ResolutionType;

    /// Participants, each listed once
    fn participants(&self) -> Vec<&NamedElement>;
}

impl MultiElementIssue for CycleGroupIssue {
    const KIND: MultiElementKind = MultiElementKind::CycleGroup;

    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn resolution(&self) -> ResolutionType {
        self.resolution
    }

    fn participants(&self) -> Vec<&NamedElement> {
        self.named_elements()
    }
}

impl MultiElementIssue for DuplicateCodeBlockIssue {
    const KIND: MultiElementKind = MultiElementKind::DuplicateCode;

    fn name(&self) -> &str {
        &self.name
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn resolution(&self) -> ResolutionType {
        self.resolution
    }

    fn participants(&self) -> Vec<&NamedElement> {
        self.named_elements()
    }
}

/// Reconcile both views for one multi-element issue type.
///
/// # Errors
///
/// - `MixedCycleMembership` if a cycle participant is present on both sides
///   with different counts
/// - `MultipleDuplicateCodeKeys` if duplicate-code changes span several keys
pub fn reconcile_multi_element_issues<I: MultiElementIssue>(
    baseline: &[&I],
    current: &[&I],
    builder: &mut IssueDeltaBuilder,
) -> Result<()> {
    let events_before = builder.event_count();
    reconcile_identity(baseline, current, builder)?;
    let participants = reconcile_membership(baseline, current, builder)?;

    debug!(
        component = module_path!(),
        op = "reconcile_multi_element_issues",
        kind = ?I::KIND,
        baseline = baseline.len(),
        current = current.len(),
        participants = participants,
        events = builder.event_count() - events_before,
    );
    Ok(())
}

fn reconcile_identity<I: MultiElementIssue>(
    baseline: &[&I],
    current: &[&I],
    builder: &mut IssueDeltaBuilder,
) -> Result<()> {
    let mut buckets: BTreeMap<&str, IssueBucket<'_, I>> = BTreeMap::new();
    for (side, issues) in [(Side::Baseline, baseline), (Side::Current, current)] {
        for issue in issues.iter().copied() {
            buckets.entry(issue.name()).or_default().push(side, issue);
        }
    }

    for (name, bucket) in buckets {
        if bucket.baseline.is_empty() && bucket.current.is_empty() {
            return Err(DeltaError::EmptyIdentityBucket {
                name: name.to_string(),
            });
        }
        // The first baseline issue of a name stands for all of them.
        let Some(first) = bucket.baseline.first() else {
            continue;
        };
        for next in &bucket.current {
            if first.resolution() != next.resolution() {
                builder.changed_resolution((*first).clone(), (*next).clone());
            }
        }
    }
    Ok(())
}

/// Returns the number of distinct (participant, key) pairs seen.
fn reconcile_membership<I: MultiElementIssue>(
    baseline: &[&I],
    current: &[&I],
    builder: &mut IssueDeltaBuilder,
) -> Result<usize> {
    let mut counts: BTreeMap<ElementIssueKey, BaselineCurrent<usize>> = BTreeMap::new();
    for (side, issues) in [(Side::Baseline, baseline), (Side::Current, current)] {
        for issue in issues.iter().copied() {
            for element in issue.participants() {
                let entry = counts
                    .entry(ElementIssueKey::new(element.fq_name.as_str(), issue.key()))
                    .or_insert_with(|| BaselineCurrent::new(0, 0));
                match side {
                    Side::Baseline => entry.baseline += 1,
                    Side::Current => entry.current += 1,
                }
            }
        }
    }

    // Totals per issue key, summed over participants whose count changed
    let mut totals: BTreeMap<String, BaselineCurrent<usize>> = BTreeMap::new();
    let participants = counts.len();

    for (key, count) in counts {
        if count.baseline == 0 && count.current == 0 {
            return Err(DeltaError::EmptyIssueBucket {
                fq_name: key.fq_name,
                issue_key: key.issue_key,
            });
        }
        if count.baseline == count.current {
            continue;
        }

        let total = totals
            .entry(key.issue_key.clone())
            .or_insert_with(|| BaselineCurrent::new(0, 0));
        total.baseline += count.baseline;
        total.current += count.current;

        match I::KIND {
            MultiElementKind::CycleGroup => record_cycle_membership(key, &count, builder)?,
            MultiElementKind::DuplicateCode => {
                builder.changed_duplicate_code_participation(key.fq_name, count)
            }
        }
    }

    match I::KIND {
        MultiElementKind::CycleGroup => {
            for (issue_key, total) in totals {
                if total.baseline > total.current {
                    builder.improved_cycle_participation(issue_key, total);
                } else if total.baseline < total.current {
                    builder.worsened_cycle_participation(issue_key, total);
                }
            }
        }
        MultiElementKind::DuplicateCode => {
            if totals.len() > 1 {
                return Err(DeltaError::MultipleDuplicateCodeKeys {
                    keys: totals.into_keys().collect(),
                });
            }
            if let Some(total) = totals.into_values().next() {
                if total.baseline > total.current {
                    builder.improved_duplicate_code_participation(total);
                } else if total.baseline < total.current {
                    builder.worsened_duplicate_code_participation(total);
                }
            }
        }
    }
    Ok(participants)
}

fn record_cycle_membership(
    key: ElementIssueKey,
    count: &BaselineCurrent<usize>,
    builder: &mut IssueDeltaBuilder,
) -> Result<()> {
    if count.baseline == 0 {
        builder.added_to_cycle(key);
    } else if count.current == 0 {
        builder.removed_from_cycle(key);
    } else {
        return Err(DeltaError::MixedCycleMembership {
            fq_name: key.fq_name,
            issue_key: key.issue_key,
            baseline: count.baseline,
            current: count.current,
        });
    }
    Ok(())
}
