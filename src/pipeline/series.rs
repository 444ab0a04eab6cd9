//! Chart-ready series handed to the rendering layer

use std::collections::HashMap;

use polars::prelude::*;

use super::config::AnalysisConfig;
use super::group_stats::GroupStats;
use super::records::{SALES_COLUMN, SHIP_MODE_COLUMN};

pub const DELAY_COLUMN: &str = "Shipping Delay (Days)";

/// Numeric/categorical series for the delay histogram, the per-mode box plot
/// and the sales-vs-delay scatter.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    /// Present delays clipped to the configured histogram range
    pub delay_distribution: DataFrame,
    /// Ship mode and delay for records with both present, rows grouped in
    /// `ship_mode_order`
    pub delay_by_ship_mode: DataFrame,
    /// Category order for the box plot (ascending median)
    pub ship_mode_order: Vec<String>,
    /// Delay and sales for records with both present
    pub sales_vs_delay: DataFrame,
}

/// Build all chart series from per-record values.
///
/// `ship_modes`, `sales` and `delays` are parallel per-record slices.
pub fn build_chart_series(
    ship_modes: &[Option<&str>],
    sales: &[Option<f64>],
    delays: &[Option<i64>],
    group_stats: &[GroupStats],
    config: &AnalysisConfig,
) -> PolarsResult<ChartSeries> {
    let clipped: Vec<i64> = delays
        .iter()
        .flatten()
        .map(|d| (*d).clamp(config.histogram_clip_min, config.histogram_clip_max))
        .collect();
    let delay_distribution = df!(DELAY_COLUMN => clipped)?;

    let ship_mode_order: Vec<String> = group_stats.iter().map(|g| g.key.clone()).collect();
    let rank: HashMap<&str, usize> = ship_mode_order
        .iter()
        .enumerate()
        .map(|(i, key)| (key.as_str(), i))
        .collect();

    let mut mode_rows: Vec<(&str, i64)> = ship_modes
        .iter()
        .zip(delays.iter())
        .filter_map(|(m, d)| Some(((*m)?, (*d)?)))
        .collect();
    // Stable: input order is kept within a ship mode
    mode_rows.sort_by_key(|(mode, _)| rank.get(mode).copied().unwrap_or(usize::MAX));
    let (modes, mode_delays): (Vec<&str>, Vec<i64>) = mode_rows.into_iter().unzip();
    let delay_by_ship_mode = df!(
        SHIP_MODE_COLUMN => modes,
        DELAY_COLUMN => mode_delays,
    )?;

    let (pair_delays, pair_sales): (Vec<i64>, Vec<f64>) = delays
        .iter()
        .zip(sales.iter())
        .filter_map(|(d, s)| Some(((*d)?, (*s)?)))
        .unzip();
    let sales_vs_delay = df!(
        DELAY_COLUMN => pair_delays,
        SALES_COLUMN => pair_sales,
    )?;

    Ok(ChartSeries {
        delay_distribution,
        delay_by_ship_mode,
        ship_mode_order,
        sales_vs_delay,
    })
}
