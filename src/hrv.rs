//! Time-domain heart-rate variability
//!
//! This module derives RMSSD from RR intervals and maps it onto a stress bucket:
//! - Successive differences between adjacent intervals
//! - Root mean square of those differences
//! - Threshold classification into [`StressLevel`]

use tracing::debug;

use crate::types::{HrvResult, RrIntervals, StressLevel};

/// RMSSD (ms) above which stress is very low
pub const VERY_LOW_STRESS_RMSSD_MS: f64 = 80.0;
/// RMSSD (ms) above which stress is low
pub const LOW_STRESS_RMSSD_MS: f64 = 60.0;
/// RMSSD (ms) above which stress is moderate
pub const MODERATE_STRESS_RMSSD_MS: f64 = 40.0;
/// RMSSD (ms) above which stress is high; at or below it is very high
pub const HIGH_STRESS_RMSSD_MS: f64 = 20.0;

/// HRV engine computing RMSSD and stress classification
pub struct HrvEngine;

impl HrvEngine {
    /// Compute RMSSD and classify it
    pub fn compute(rr: &RrIntervals) -> HrvResult {
        let rmssd = compute_rmssd(rr);
        let stress_level = classify_stress(rmssd);

        debug!(
            intervals = rr.len(),
            rmssd,
            stress_level = stress_level.as_str(),
            "computed hrv"
        );

        HrvResult {
            rmssd,
            stress_level,
        }
    }
}

/// Compute RMSSD and classify it
pub fn compute_hrv(rr: &RrIntervals) -> HrvResult {
    HrvEngine::compute(rr)
}

/// Differences between each interval and the one before it
pub fn successive_differences(intervals: &[f64]) -> Vec<f64> {
    intervals.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Root mean square of successive differences, in milliseconds.
///
/// Differences are scaled by their largest magnitude before squaring, so any
/// finite input yields a finite result.
pub fn compute_rmssd(rr: &RrIntervals) -> f64 {
    let diffs = successive_differences(rr.as_slice());
    let scale = diffs.iter().fold(0.0_f64, |max, d| max.max(d.abs()));
    if scale == 0.0 {
        return 0.0;
    }

    // RrIntervals holds at least two values, so there is at least one difference
    let mean_square = diffs
        .iter()
        .map(|d| {
            let scaled = d / scale;
            scaled * scaled
        })
        .sum::<f64>()
        / diffs.len() as f64;
    scale * mean_square.sqrt()
}

/// Map RMSSD to a stress bucket.
///
/// Thresholds are exclusive lower bounds checked from the top down, so a value
/// sitting exactly on a threshold lands in the next more-stressed bucket.
pub fn classify_stress(rmssd: f64) -> StressLevel {
    if rmssd > VERY_LOW_STRESS_RMSSD_MS {
        StressLevel::VeryLow
    } else if rmssd > LOW_STRESS_RMSSD_MS {
        StressLevel::Low
    } else if rmssd > MODERATE_STRESS_RMSSD_MS {
        StressLevel::Moderate
    } else if rmssd > HIGH_STRESS_RMSSD_MS {
        StressLevel::High
    } else {
        StressLevel::VeryHigh
    }
}
