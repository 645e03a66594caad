//! Issue classification and bucketing.
//!
//! Every issue is routed to exactly one reconciler by its variant. Within a
//! reconciler, issues are grouped into buckets that hold the baseline and
//! current members sharing one key.

use crate::errors::{DeltaError, Result};
use crate::model::{CycleGroupIssue, DuplicateCodeBlockIssue, Issue, SingleElementIssue};

/// Issues of one snapshot split by variant, each list in snapshot order
#[derive(Debug, Default)]
pub struct ClassifiedIssues<'a> {
    pub single_element: Vec<&'a SingleElementIssue>,
    pub cycle_groups: Vec<&'a CycleGroupIssue>,
    pub duplicate_code: Vec<&'a DuplicateCodeBlockIssue>,
}

impl ClassifiedIssues<'_> {
    pub fn len(&self) -> usize {
        self.single_element.len() + self.cycle_groups.len() + self.duplicate_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split issues by variant.
pub fn classify_issues<'a, I>(issues: I) -> ClassifiedIssues<'a>
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut classified = ClassifiedIssues::default();
    for issue in issues {
        match issue {
            Issue::SingleElement(i) => classified.single_element.push(i),
            Issue::CycleGroup(i) => classified.cycle_groups.push(i),
            Issue::DuplicateCodeBlock(i) => classified.duplicate_code.push(i),
        }
    }
    classified
}

/// Which snapshot an issue came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Baseline,
    Current,
}

/// Baseline and current issues sharing one bucket key
#[derive(Debug)]
pub struct IssueBucket<'a, T> {
    pub baseline: Vec<&'a T>,
    pub current: Vec<&'a T>,
}

impl<T> Default for IssueBucket<'_, T> {
    fn default() -> Self {
        Self {
            baseline: Vec::new(),
            current: Vec::new(),
        }
    }
}

impl<'a, T> IssueBucket<'a, T> {
    pub fn push(&mut self, side: Side, issue: &'a T) {
        match side {
            Side::Baseline => self.baseline.push(issue),
            Side::Current => self.current.push(issue),
        }
    }

    /// A bucket only exists because something was put into it.
    ///
    /// # Errors
    ///
    /// `EmptyIssueBucket` if neither side holds an issue.
    pub fn ensure_non_empty(&self, fq_name: &str, issue_key: &str) -> Result<()> {
        if self.baseline.is_empty() && self.current.is_empty() {
            return Err(DeltaError::EmptyIssueBucket {
                fq_name: fq_name.to_string(),
                issue_key: issue_key.to_string(),
            });
        }
        Ok(())
    }
}
