//! Property-based tests for the delta engine

use proptest::prelude::*;

mod common;

use common::*;
use sysdelta_core::delta::classify::classify_issues;
use sysdelta_core::delta::threshold::{threshold_trend, ThresholdTrend};
use sysdelta_core::model::{
    Analyzer, Feature, Issue, MetricThreshold, Module, ResolutionType, SingleElementIssue,
};
use sysdelta_core::{compute_delta, Snapshot};

// ============================================================================
// Strategies
// ============================================================================

fn fq_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["pkg.A", "pkg.B", "pkg.C"]).prop_map(|s| s.to_string())
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Todo", "Fixme", "Unused"]).prop_map(|s| s.to_string())
}

fn single_strategy() -> impl Strategy<Value = SingleElementIssue> {
    (fq_name_strategy(), key_strategy(), 1..200i32, 0..80i32)
        .prop_map(|(fq, key, line, column)| single(&fq, &key, line, column))
}

fn issue_strategy() -> impl Strategy<Value = Issue> {
    prop_oneof![
        single_strategy().prop_map(Issue::from),
        prop::collection::vec(fq_name_strategy(), 1..4)
            .prop_map(|members| {
                let refs: Vec<&str> = members.iter().map(String::as_str).collect();
                Issue::from(cycle("CycleGroup", "Cycle", &refs))
            }),
        prop::collection::vec(fq_name_strategy(), 1..4).prop_map(|files| {
            let refs: Vec<&str> = files.iter().map(String::as_str).collect();
            Issue::from(duplicate_block("Block", &refs))
        }),
    ]
}

fn resolution_strategy() -> impl Strategy<Value = ResolutionType> {
    prop::sample::select(vec![
        ResolutionType::None,
        ResolutionType::Todo,
        ResolutionType::Fixed,
        ResolutionType::Ignored,
        ResolutionType::Refactoring,
    ])
}

fn violation_strategy() -> impl Strategy<Value = Issue> {
    (fq_name_strategy(), 0.0f64..2000.0)
        .prop_map(|(fq, value)| Issue::from(loc_violation(&fq, value)))
}

fn with_resolution(issue: Issue, resolution: ResolutionType) -> Issue {
    match issue {
        Issue::SingleElement(i) => i.with_resolution(resolution).into(),
        Issue::CycleGroup(i) => i.with_resolution(resolution).into(),
        Issue::DuplicateCodeBlock(i) => i.with_resolution(resolution).into(),
    }
}

/// Cycles and blocks are identified by name, so each gets its own
fn with_unique_name(issue: Issue, index: usize) -> Issue {
    match issue {
        Issue::CycleGroup(mut i) => {
            i.name = format!("Cycle {index}");
            i.into()
        }
        Issue::DuplicateCodeBlock(mut i) => {
            i.name = format!("Block {index}");
            i.into()
        }
        other => other,
    }
}

fn mixed_issue_strategy() -> impl Strategy<Value = Issue> {
    (
        prop_oneof![issue_strategy(), violation_strategy()],
        resolution_strategy(),
    )
        .prop_map(|(issue, resolution)| with_resolution(issue, resolution))
}

fn module_strategy() -> impl Strategy<Value = Module> {
    (
        prop::sample::select(vec!["core", "web", "api"]),
        prop::collection::vec(prop::sample::select(vec!["/src", "/generated", "/test"]), 0..3),
    )
        .prop_map(|(name, roots)| roots.into_iter().fold(Module::new(name), Module::with_root))
}

fn threshold_strategy() -> impl Strategy<Value = MetricThreshold> {
    (
        prop::sample::select(vec!["CoreLinesOfCode", "CoreComplexity"]),
        0.0f64..10.0,
        100.0f64..1000.0,
    )
        .prop_map(|(id, lower, upper)| MetricThreshold::new(id, "SourceFile", lower, upper))
}

fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
    (
        prop::collection::vec(mixed_issue_strategy(), 0..25),
        prop::collection::vec(module_strategy(), 0..4),
        prop::collection::vec(
            (prop::sample::select(vec!["Architecture", "Scripting"]), any::<bool>()),
            0..3,
        ),
        prop::collection::vec(prop::sample::select(vec!["CycleAnalyzer", "DuplicateCodeAnalyzer"]), 0..3),
        prop::collection::vec(threshold_strategy(), 0..3),
    )
        .prop_map(|(issues, modules, features, analyzers, thresholds)| {
            let s = issues
                .into_iter()
                .enumerate()
                .fold(snapshot("run-1"), |s, (i, issue)| {
                    s.with_issue(with_unique_name(issue, i))
                });
            let s = modules.into_iter().fold(s, Snapshot::with_module);
            let s = features
                .into_iter()
                .fold(s, |s, (name, licensed)| s.with_feature(Feature::new(name, licensed)));
            let s = analyzers
                .into_iter()
                .fold(s, |s, id| s.with_analyzer(Analyzer::new(id, true)));
            thresholds.into_iter().fold(s, Snapshot::with_metric_threshold)
        })
}

fn threshold() -> MetricThreshold {
    MetricThreshold::new("CoreLinesOfCode", "SourceFile", 100.0, 750.0)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every issue lands in exactly one classification bucket.
    #[test]
    fn prop_classification_is_partition(issues in prop::collection::vec(issue_strategy(), 0..30)) {
        let classified = classify_issues(&issues);
        prop_assert_eq!(classified.len(), issues.len());

        let singles = issues.iter().filter(|i| matches!(i, Issue::SingleElement(_))).count();
        let cycles = issues.iter().filter(|i| matches!(i, Issue::CycleGroup(_))).count();
        prop_assert_eq!(classified.single_element.len(), singles);
        prop_assert_eq!(classified.cycle_groups.len(), cycles);
        prop_assert_eq!(classified.duplicate_code.len(), issues.len() - singles - cycles);
    }

    /// Comparing a snapshot with itself yields an empty delta.
    #[test]
    fn prop_self_delta_is_empty(s in snapshot_strategy()) {
        let delta = compute_delta(&s, &s).expect("delta");

        prop_assert!(delta.is_empty());
    }

    /// Unequal residuals produce exactly B removed and C added.
    #[test]
    fn prop_unmatched_bucket_cardinality(b in 0usize..6, c in 0usize..6) {
        prop_assume!(b != c);
        // Baseline lines are even, current lines odd: no positional match
        let baseline = (0..b).fold(snapshot("run-1"), |s, i| {
            s.with_issue(single("pkg.A", "Todo", (i as i32) * 2, 1))
        });
        let current = (0..c).fold(snapshot("run-2"), |s, i| {
            s.with_issue(single("pkg.A", "Todo", (i as i32) * 2 + 1, 1))
        });

        let delta = compute_delta(&baseline, &current).expect("delta");

        prop_assert_eq!(delta.issue_delta.removed.len(), b);
        prop_assert_eq!(delta.issue_delta.added.len(), c);
        prop_assert_eq!(
            delta.issue_delta.added.len() as i64 - delta.issue_delta.removed.len() as i64,
            c as i64 - b as i64
        );
    }

    /// Below the lower bound, rising is never worse and falling is never better.
    #[test]
    fn prop_trend_monotonic_below_lower_bound(
        baseline in 0.0f64..99.0,
        delta in 0.0f64..500.0,
    ) {
        let t = threshold();
        let up = threshold_trend(baseline, baseline + delta, &t, 2);
        let down = threshold_trend(baseline, baseline - delta, &t, 2);

        prop_assert_ne!(up, Some(ThresholdTrend::Worsened));
        prop_assert_ne!(down, Some(ThresholdTrend::Improved));
    }

    /// Above the upper bound, falling is never worse and rising is never better.
    #[test]
    fn prop_trend_monotonic_above_upper_bound(
        baseline in 751.0f64..5000.0,
        delta in 0.0f64..500.0,
    ) {
        let t = threshold();
        prop_assert_ne!(threshold_trend(baseline, baseline - delta, &t, 2), Some(ThresholdTrend::Worsened));
        prop_assert_ne!(threshold_trend(baseline, baseline + delta, &t, 2), Some(ThresholdTrend::Improved));
    }

    /// Within bounds there is never a trend.
    #[test]
    fn prop_no_trend_within_bounds(baseline in 100.0f64..750.0, current in 0.0f64..5000.0) {
        prop_assert_eq!(threshold_trend(baseline, current, &threshold(), 2), None);
    }
}
