//! Descriptive statistics over delay values

use serde::Serialize;

/// Distribution summary of a set of delays (days).
///
/// Every statistic is `None` for an empty set; `std` is also `None` for a
/// single value (sample standard deviation, n - 1 denominator).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DelaySummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// 75th minus 25th percentile, linear interpolation
    pub iqr: Option<f64>,
}

impl DelaySummary {
    pub fn from_delays(delays: &[i64]) -> Self {
        if delays.is_empty() {
            return Self::default();
        }

        let mut sorted: Vec<f64> = delays.iter().map(|&d| d as f64).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let iqr = match (quantile(&sorted, 0.25), quantile(&sorted, 0.75)) {
            (Some(q1), Some(q3)) => Some(q3 - q1),
            _ => None,
        };

        Self {
            count: delays.len(),
            mean: mean(&sorted),
            median: quantile(&sorted, 0.5),
            std: sample_std(&sorted),
            min: delays.iter().min().copied(),
            max: delays.iter().max().copied(),
            iqr,
        }
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation; `None` for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Quantile of already sorted values using linear interpolation between
/// closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Median of unsorted delays.
pub fn median_of(delays: &[i64]) -> Option<f64> {
    let mut sorted: Vec<f64> = delays.iter().map(|&d| d as f64).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    quantile(&sorted, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile(&[7.0], 0.25), Some(7.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_sample_std_uses_n_minus_one() {
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((std - 2.138089935).abs() < 1e-6, "got {}", std);
        assert_eq!(sample_std(&[3.0]), None);
    }

    #[test]
    fn test_summary_of_empty_is_all_absent() {
        let summary = DelaySummary::from_delays(&[]);
        assert_eq!(summary.count, 0);
        assert!(summary.mean.is_none());
        assert!(summary.median.is_none());
        assert!(summary.iqr.is_none());
    }

    #[test]
    fn test_summary_mixed_signs() {
        let summary = DelaySummary::from_delays(&[9, -3, 2]);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.median, Some(2.0));
        assert_eq!(summary.min, Some(-3));
        assert_eq!(summary.max, Some(9));
        assert!((summary.mean.unwrap() - 8.0 / 3.0).abs() < 1e-12);
        // q1 = -0.5, q3 = 5.5
        assert_eq!(summary.iqr, Some(6.0));
    }
}
