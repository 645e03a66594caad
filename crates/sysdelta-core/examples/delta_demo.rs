//! Delta Demonstration
//!
//! Builds a baseline and a current snapshot of a small system and prints the
//! reconciled delta as JSON.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Line shifts are paired instead of reported as add/remove churn
//! 2. Threshold trends on matched violations
//! 3. Cycle membership changes
//! 4. Module root directory breakdown

use chrono::{TimeZone, Utc};
use sysdelta_core::logging_facility::{init, Profile};
use sysdelta_core::model::{
    CycleGroupIssue, MetricThreshold, Module, NamedElement, ResolutionType, SingleElementIssue,
    SystemInfo,
};
use sysdelta_core::{compute_delta, Snapshot};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    let cart = NamedElement::new("shop.core.Cart", "Cart");
    let order = NamedElement::new("shop.core.Order", "Order");
    let invoice = NamedElement::new("shop.billing.Invoice", "Invoice");
    let loc = MetricThreshold::new("CoreLinesOfCode", "SourceFile", 0.0, 750.0);

    let baseline = Snapshot::new(SystemInfo::new(
        "shop",
        "Shop",
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
    ))
    .with_module(Module::new("core").with_root("/src"))
    .with_metric_threshold(loc.clone())
    .with_issue(SingleElementIssue::new("Todo", "TODO", cart.clone(), 10, 4))
    .with_issue(
        SingleElementIssue::new("ThresholdViolation", "Lines of code", order.clone(), 1, 0)
            .with_threshold(1200.0, loc.clone()),
    )
    .with_issue(CycleGroupIssue::new(
        "CycleGroup",
        "core cycle",
        vec![cart.clone(), order.clone()],
    ));

    // Two lines were inserted above the TODO, which then got fixed
    let current = Snapshot::new(SystemInfo::new(
        "shop",
        "Shop",
        Utc.with_ymd_and_hms(2026, 2, 5, 9, 0, 0).unwrap(),
    ))
    .with_module(Module::new("core").with_root("/src").with_root("/generated"))
    .with_metric_threshold(loc.clone())
    .with_issue(
        SingleElementIssue::new("Todo", "TODO", cart.clone(), 12, 4)
            .with_resolution(ResolutionType::Fixed),
    )
    .with_issue(
        SingleElementIssue::new("ThresholdViolation", "Lines of code", order.clone(), 1, 0)
            .with_threshold(980.0, loc),
    )
    .with_issue(CycleGroupIssue::new(
        "CycleGroup",
        "core cycle",
        vec![cart, order, invoice],
    ));

    let delta = compute_delta(&baseline, &current)?;

    println!("=== SysDelta Demo ===\n");
    println!("{}", serde_json::to_string_pretty(&delta)?);

    Ok(())
}
