//! Single-pass shipping analysis over an immutable set of order records

use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::{debug, info};

use super::anomaly::{detect_anomalies, AnomalyReport};
use super::config::AnalysisConfig;
use super::correlation::{sales_delay_correlation, CorrelationResult};
use super::dates::{normalize_dates, DateParseStats};
use super::delay::{compute_delays, present_delays};
use super::error::AnalysisError;
use super::group_stats::{aggregate_by_group, GroupStats};
use super::records::{extract_order_records, OrderRecord, SALES_COLUMN, SHIP_MODE_COLUMN};
use super::series::{build_chart_series, ChartSeries, DELAY_COLUMN};
use super::stats::DelaySummary;

/// Timestamp layout used when exporting parsed dates
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One order record enriched with everything derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct DelayRecord {
    pub ship_mode: Option<String>,
    pub sales: Option<f64>,
    pub order_date: Option<NaiveDateTime>,
    pub ship_date: Option<NaiveDateTime>,
    pub order_date_invalid: bool,
    pub ship_date_invalid: bool,
    pub shipping_delay_days: Option<i64>,
    pub anomalous: bool,
}

/// Complete result set of one analysis run
#[derive(Debug, Clone)]
pub struct ShippingAnalysis {
    pub config: AnalysisConfig,
    pub records: Vec<DelayRecord>,
    pub order_date_stats: DateParseStats,
    pub ship_date_stats: DateParseStats,
    pub overall: DelaySummary,
    /// In report order (ascending median)
    pub groups: Vec<GroupStats>,
    pub anomalies: AnomalyReport,
    pub correlation: CorrelationResult,
}

impl ShippingAnalysis {
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    pub fn order_date_invalid(&self) -> usize {
        self.order_date_stats.invalid
    }

    pub fn ship_date_invalid(&self) -> usize {
        self.ship_date_stats.invalid
    }

    /// Records with at least one invalid date
    pub fn invalid_date_records(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.order_date_invalid || r.ship_date_invalid)
            .count()
    }

    pub fn sales_invalid(&self) -> usize {
        self.records.iter().filter(|r| r.sales.is_none()).count()
    }

    pub fn delays(&self) -> Vec<Option<i64>> {
        self.records.iter().map(|r| r.shipping_delay_days).collect()
    }

    /// Series for the delay histogram, per-mode box plot and sales scatter.
    pub fn chart_series(&self) -> PolarsResult<ChartSeries> {
        let ship_modes: Vec<Option<&str>> =
            self.records.iter().map(|r| r.ship_mode.as_deref()).collect();
        let sales: Vec<Option<f64>> = self.records.iter().map(|r| r.sales).collect();
        build_chart_series(
            &ship_modes,
            &sales,
            &self.delays(),
            &self.groups,
            &self.config,
        )
    }

    /// Enriched per-record table.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let format_ts = |ts: Option<NaiveDateTime>| {
            ts.map(|t| t.format(EXPORT_TIMESTAMP_FORMAT).to_string())
        };

        let ship_modes: Vec<Option<&str>> =
            self.records.iter().map(|r| r.ship_mode.as_deref()).collect();
        let sales: Vec<Option<f64>> = self.records.iter().map(|r| r.sales).collect();
        let order_dates: Vec<Option<String>> =
            self.records.iter().map(|r| format_ts(r.order_date)).collect();
        let ship_dates: Vec<Option<String>> =
            self.records.iter().map(|r| format_ts(r.ship_date)).collect();
        let order_invalid: Vec<bool> = self.records.iter().map(|r| r.order_date_invalid).collect();
        let ship_invalid: Vec<bool> = self.records.iter().map(|r| r.ship_date_invalid).collect();
        let delays = self.delays();
        let anomalous: Vec<bool> = self.records.iter().map(|r| r.anomalous).collect();

        df!(
            SHIP_MODE_COLUMN => ship_modes,
            SALES_COLUMN => sales,
            "Order Date Parsed" => order_dates,
            "Ship Date Parsed" => ship_dates,
            "Order Date Invalid" => order_invalid,
            "Ship Date Invalid" => ship_invalid,
            DELAY_COLUMN => delays,
            "Suspicious" => anomalous,
        )
    }
}

/// Check the schema of `df`, then analyze its records.
pub fn analyze_dataframe(
    df: &DataFrame,
    config: &AnalysisConfig,
) -> Result<ShippingAnalysis, AnalysisError> {
    config.validate()?;
    let records = extract_order_records(df)?;
    analyze_records(&records, config)
}

/// Run every stage over in-memory records.
pub fn analyze_records(
    records: &[OrderRecord],
    config: &AnalysisConfig,
) -> Result<ShippingAnalysis, AnalysisError> {
    config.validate()?;

    let order_raw: Vec<Option<&str>> = records.iter().map(|r| r.order_date_raw.as_deref()).collect();
    let ship_raw: Vec<Option<&str>> = records.iter().map(|r| r.ship_date_raw.as_deref()).collect();
    let order_dates = normalize_dates(&order_raw);
    let ship_dates = normalize_dates(&ship_raw);

    let delays = compute_delays(&order_dates.values, &ship_dates.values);
    let valid = present_delays(&delays);
    debug!(
        records = records.len(),
        valid_delays = valid.len(),
        "Computed shipping delays"
    );

    let overall = DelaySummary::from_delays(&valid);

    let ship_modes: Vec<Option<&str>> = records.iter().map(|r| r.ship_mode.as_deref()).collect();
    let groups = aggregate_by_group(&ship_modes, &delays, config.long_tail_days);

    let anomalies = detect_anomalies(&delays, config);

    let sales: Vec<Option<f64>> = records.iter().map(|r| r.sales).collect();
    let correlation = sales_delay_correlation(&sales, &delays);

    let enriched = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let order = order_dates.values[i];
            let ship = ship_dates.values[i];
            DelayRecord {
                ship_mode: record.ship_mode.clone(),
                sales: record.sales,
                order_date: order.timestamp(),
                ship_date: ship.timestamp(),
                order_date_invalid: order.is_invalid(),
                ship_date_invalid: ship.is_invalid(),
                shipping_delay_days: delays[i],
                anomalous: anomalies.flags[i],
            }
        })
        .collect();

    info!(
        records = records.len(),
        groups = groups.len(),
        suspicious = anomalies.count,
        "Shipping analysis complete"
    );

    Ok(ShippingAnalysis {
        config: config.clone(),
        records: enriched,
        order_date_stats: order_dates.stats,
        ship_date_stats: ship_dates.stats,
        overall,
        groups,
        anomalies,
        correlation,
    })
}
