//! Rank correlation between order value and shipping delay

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::warn;

/// Spearman correlation of sales against delay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    /// Rank correlation coefficient in [-1, 1]
    pub coefficient: Option<f64>,
    /// Two-sided p-value for H0: no monotonic association
    pub p_value: Option<f64>,
    /// Number of (sales, delay) pairs with both values present
    pub pairs: usize,
}

impl CorrelationResult {
    pub fn absent(pairs: usize) -> Self {
        Self {
            coefficient: None,
            p_value: None,
            pairs,
        }
    }
}

/// Spearman correlation over records where both sales and delay are present.
///
/// With zero valid pairs both outputs are absent. With pairs but a constant
/// variable, or fewer than two pairs, the coefficient is absent. The p-value
/// needs at least three pairs.
pub fn sales_delay_correlation(sales: &[Option<f64>], delays: &[Option<i64>]) -> CorrelationResult {
    let (xs, ys): (Vec<f64>, Vec<f64>) = sales
        .iter()
        .zip(delays.iter())
        .filter_map(|(s, d)| match (s, d) {
            (Some(s), Some(d)) => Some((*s, *d as f64)),
            _ => None,
        })
        .unzip();

    spearman(&xs, &ys)
}

/// Spearman rank correlation with a t-approximation p-value.
pub fn spearman(x: &[f64], y: &[f64]) -> CorrelationResult {
    let n = x.len().min(y.len());
    if n == 0 {
        return CorrelationResult::absent(0);
    }
    if n < 2 {
        warn!(pairs = n, "Too few pairs for a rank correlation");
        return CorrelationResult::absent(n);
    }

    let rx = rank_data(&x[..n]);
    let ry = rank_data(&y[..n]);

    let Some(r) = pearson(&rx, &ry) else {
        warn!(pairs = n, "Constant input; rank correlation is undefined");
        return CorrelationResult::absent(n);
    };

    CorrelationResult {
        coefficient: Some(r),
        p_value: correlation_p_value(r, n),
        pairs: n,
    }
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Two-tailed p-value via t = r * sqrt((n - 2) / (1 - r^2)), df = n - 2.
fn correlation_p_value(r: f64, n: usize) -> Option<f64> {
    if n < 3 {
        return None;
    }
    let df = (n - 2) as f64;
    let r2 = r * r;

    // r = +/-1: t diverges
    if r2 >= 1.0 - 1e-15 {
        return Some(0.0);
    }

    let t = r * (df / (1.0 - r2)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

/// 1-based ranks; ties share the average of the ranks they span.
fn rank_data(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    let mut indexed: Vec<(usize, f64)> = data.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && indexed[j].1 == indexed[i].1 {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 0.5;
        for item in &indexed[i..j] {
            ranks[item.0] = avg_rank;
        }
        i = j;
    }

    ranks
}
