//! Analysis configuration

use serde::Serialize;

use super::error::AnalysisError;

/// Tunables used by the analysis stages.
///
/// The fallback threshold constants are heuristics, so they are exposed
/// alongside the rest instead of being hard-coded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisConfig {
    /// Delays strictly greater than this count toward the long-tail rate
    pub long_tail_days: i64,
    /// Number of standard deviations above the median for the anomaly threshold
    pub std_multiplier: f64,
    /// Offset added to the median when the standard deviation is undefined
    pub fallback_offset_days: f64,
    /// Threshold used when there is no valid delay at all
    pub fallback_threshold_days: f64,
    /// Lower clip bound for the delay distribution series
    pub histogram_clip_min: i64,
    /// Upper clip bound for the delay distribution series
    pub histogram_clip_max: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            long_tail_days: 7,
            std_multiplier: 3.0,
            fallback_offset_days: 30.0,
            fallback_threshold_days: 30.0,
            histogram_clip_min: -5,
            histogram_clip_max: 30,
        }
    }
}

impl AnalysisConfig {
    /// Check that every field holds a usable value.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.std_multiplier.is_finite() || self.std_multiplier < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "std_multiplier must be a non-negative number, got {}",
                self.std_multiplier
            )));
        }
        if !self.fallback_offset_days.is_finite() || !self.fallback_threshold_days.is_finite() {
            return Err(AnalysisError::InvalidConfig(
                "fallback thresholds must be finite".to_string(),
            ));
        }
        if self.long_tail_days < 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "long_tail_days must be >= 0, got {}",
                self.long_tail_days
            )));
        }
        if self.histogram_clip_min > self.histogram_clip_max {
            return Err(AnalysisError::InvalidConfig(format!(
                "histogram clip range is inverted: [{}, {}]",
                self.histogram_clip_min, self.histogram_clip_max
            )));
        }
        Ok(())
    }
}
