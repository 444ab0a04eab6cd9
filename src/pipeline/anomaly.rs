//! Suspicious shipping-delay detection

use serde::Serialize;
use tracing::debug;

use super::config::AnalysisConfig;
use super::delay::present_delays;
use super::stats::{median_of, sample_std};

/// Which rung of the fallback ladder produced the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdRule {
    /// median + k * std
    MedianPlusStd,
    /// median + fixed offset (std undefined)
    MedianPlusOffset,
    /// fixed value (no delay data)
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyThreshold {
    pub value: f64,
    pub rule: ThresholdRule,
}

/// Per-record anomaly flags and the threshold that produced them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub threshold: AnomalyThreshold,
    #[serde(skip)]
    pub flags: Vec<bool>,
    pub count: usize,
}

/// Derive the global threshold from all present delays.
pub fn compute_threshold(delays: &[i64], config: &AnalysisConfig) -> AnomalyThreshold {
    let median = median_of(delays);
    let values: Vec<f64> = delays.iter().map(|&d| d as f64).collect();
    let std = sample_std(&values);

    let threshold = match (median, std) {
        (Some(m), Some(s)) => AnomalyThreshold {
            value: m + config.std_multiplier * s,
            rule: ThresholdRule::MedianPlusStd,
        },
        (Some(m), None) => AnomalyThreshold {
            value: m + config.fallback_offset_days,
            rule: ThresholdRule::MedianPlusOffset,
        },
        _ => AnomalyThreshold {
            value: config.fallback_threshold_days,
            rule: ThresholdRule::Fixed,
        },
    };

    debug!(
        threshold = threshold.value,
        rule = ?threshold.rule,
        samples = delays.len(),
        "Computed anomaly threshold"
    );

    threshold
}

/// A record is anomalous when its delay is negative or above the threshold.
/// Records without a delay never are.
pub fn is_anomalous(delay: Option<i64>, threshold: f64) -> bool {
    match delay {
        Some(d) => d < 0 || (d as f64) > threshold,
        None => false,
    }
}

pub fn flag_anomalies(delays: &[Option<i64>], threshold: f64) -> Vec<bool> {
    delays.iter().map(|&d| is_anomalous(d, threshold)).collect()
}

/// Compute the threshold and flag every record against it.
pub fn detect_anomalies(delays: &[Option<i64>], config: &AnalysisConfig) -> AnomalyReport {
    let threshold = compute_threshold(&present_delays(delays), config);
    let flags = flag_anomalies(delays, threshold.value);
    let count = flags.iter().filter(|&&f| f).count();

    AnomalyReport {
        threshold,
        flags,
        count,
    }
}
