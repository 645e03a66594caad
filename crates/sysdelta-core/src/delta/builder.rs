//! Incremental assembly of an [`IssueDelta`].
//!
//! Reconcilers append events as they walk their buckets; `finish` hands back
//! the accumulated delta.

use crate::delta::model::{BaselineCurrent, ElementIssueKey, IssueDelta};
use crate::model::{Issue, SingleElementIssue};

#[derive(Debug, Default)]
pub struct IssueDeltaBuilder {
    delta: IssueDelta,
}

impl IssueDeltaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn added(&mut self, issue: impl Into<Issue>) {
        self.delta.added.push(issue.into());
    }

    pub fn removed(&mut self, issue: impl Into<Issue>) {
        self.delta.removed.push(issue.into());
    }

    pub fn changed_resolution(&mut self, baseline: impl Into<Issue>, current: impl Into<Issue>) {
        self.delta
            .changed_resolution
            .push(BaselineCurrent::new(baseline.into(), current.into()));
    }

    pub fn improved_threshold(
        &mut self,
        baseline: &SingleElementIssue,
        current: &SingleElementIssue,
    ) {
        self.delta
            .improved_thresholds
            .push(BaselineCurrent::new(baseline.clone(), current.clone()));
    }

    pub fn worsened_threshold(
        &mut self,
        baseline: &SingleElementIssue,
        current: &SingleElementIssue,
    ) {
        self.delta
            .worsened_thresholds
            .push(BaselineCurrent::new(baseline.clone(), current.clone()));
    }

    pub fn added_to_cycle(&mut self, key: ElementIssueKey) {
        self.delta.added_to_cycle.push(key);
    }

    pub fn removed_from_cycle(&mut self, key: ElementIssueKey) {
        self.delta.removed_from_cycle.push(key);
    }

    pub fn improved_cycle_participation(
        &mut self,
        issue_key: impl Into<String>,
        counts: BaselineCurrent<usize>,
    ) {
        self.delta
            .improved_cycle_participation
            .insert(issue_key.into(), counts);
    }

    pub fn worsened_cycle_participation(
        &mut self,
        issue_key: impl Into<String>,
        counts: BaselineCurrent<usize>,
    ) {
        self.delta
            .worsened_cycle_participation
            .insert(issue_key.into(), counts);
    }

    pub fn changed_duplicate_code_participation(
        &mut self,
        fq_name: impl Into<String>,
        counts: BaselineCurrent<usize>,
    ) {
        self.delta
            .changed_duplicate_code_participation
            .insert(fq_name.into(), counts);
    }

    pub fn improved_duplicate_code_participation(&mut self, counts: BaselineCurrent<usize>) {
        self.delta.improved_duplicate_code_participation = Some(counts);
    }

    pub fn worsened_duplicate_code_participation(&mut self, counts: BaselineCurrent<usize>) {
        self.delta.worsened_duplicate_code_participation = Some(counts);
    }

    /// Number of list and map entries recorded so far
    pub fn event_count(&self) -> usize {
        let d = &self.delta;
        d.added.len()
            + d.removed.len()
            + d.changed_resolution.len()
            + d.improved_thresholds.len()
            + d.worsened_thresholds.len()
            + d.added_to_cycle.len()
            + d.removed_from_cycle.len()
            + d.improved_cycle_participation.len()
            + d.worsened_cycle_participation.len()
            + d.changed_duplicate_code_participation.len()
            + usize::from(d.improved_duplicate_code_participation.is_some())
            + usize::from(d.worsened_duplicate_code_participation.is_some())
    }

    pub fn finish(self) -> IssueDelta {
        self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NamedElement;

    #[test]
    fn test_builder_accumulates_events() {
        let issue = SingleElementIssue::new("Todo", "TODO", NamedElement::new("pkg.A", "A"), 1, 1);
        let mut builder = IssueDeltaBuilder::new();
        assert_eq!(builder.event_count(), 0);

        builder.added(issue.clone());
        builder.removed(issue.clone());
        builder.added_to_cycle(ElementIssueKey::new("pkg.A", "CycleGroup"));
        builder.worsened_duplicate_code_participation(BaselineCurrent::new(1, 3));
        assert_eq!(builder.event_count(), 4);

        let delta = builder.finish();
        assert_eq!(delta.added, vec![Issue::from(issue.clone())]);
        assert_eq!(delta.removed, vec![Issue::from(issue)]);
        assert_eq!(
            delta.worsened_duplicate_code_participation,
            Some(BaselineCurrent::new(1, 3))
        );
        assert!(delta.improved_duplicate_code_participation.is_none());
    }

    #[test]
    fn test_empty_builder_finishes_empty() {
        assert!(IssueDeltaBuilder::new().finish().is_empty());
    }
}
