//! Threshold trend detection for matched threshold violations.
//!
//! Values are rounded to a fixed number of decimal places before comparing,
//! so jitter below that precision is never reported.

use crate::model::MetricThreshold;

/// Direction a matched threshold violation moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdTrend {
    Improved,
    Worsened,
}

/// Values too large to scale have no fractional digits left and are kept as is.
fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// True if the values differ after rounding to `precision` decimal places.
///
/// NaN never counts as a change.
pub fn has_changed(baseline_value: f64, current_value: f64, precision: u32) -> bool {
    if baseline_value.is_nan() || current_value.is_nan() {
        return false;
    }
    round_to(baseline_value, precision) != round_to(current_value, precision)
}

/// Classify how a metric value moved relative to the baseline threshold.
///
/// - below the lower bound in baseline: rising is an improvement
/// - above the upper bound in baseline: falling is an improvement
/// - within bounds in baseline: no trend
pub fn threshold_trend(
    baseline_value: f64,
    current_value: f64,
    threshold: &MetricThreshold,
    precision: u32,
) -> Option<ThresholdTrend> {
    if !has_changed(baseline_value, current_value, precision) {
        return None;
    }

    if baseline_value < threshold.lower_threshold {
        if current_value > baseline_value {
            Some(ThresholdTrend::Improved)
        } else {
            Some(ThresholdTrend::Worsened)
        }
    } else if baseline_value > threshold.upper_threshold {
        if current_value < baseline_value {
            Some(ThresholdTrend::Improved)
        } else {
            Some(ThresholdTrend::Worsened)
        }
    } else {
        None
    }
}
