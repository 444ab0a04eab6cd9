//! File exports: JSON result set, CSV tables and the text summary

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::{
    AnalysisConfig, AnomalyReport, CorrelationResult, DateParseStats, DelaySummary, GroupStats,
    ShippingAnalysis,
};
use crate::report::render_summary;

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the export (RFC 3339)
    pub timestamp: String,
    pub shiplag_version: String,
    pub input_file: String,
    pub config: AnalysisConfig,
}

/// Record and data-quality counts
#[derive(Serialize)]
pub struct ExportCounts {
    pub total_records: usize,
    pub order_dates: DateParseStats,
    pub ship_dates: DateParseStats,
    pub invalid_date_records: usize,
    pub sales_invalid: usize,
}

/// Complete JSON export of an analysis
#[derive(Serialize)]
pub struct ShippingAnalysisExport<'a> {
    pub metadata: ExportMetadata,
    pub counts: ExportCounts,
    pub overall: &'a DelaySummary,
    pub ship_modes: &'a [GroupStats],
    pub anomalies: &'a AnomalyReport,
    pub correlation: &'a CorrelationResult,
}

impl<'a> ShippingAnalysisExport<'a> {
    pub fn new(analysis: &'a ShippingAnalysis, input_file: &str) -> Self {
        Self {
            metadata: ExportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                shiplag_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input_file.to_string(),
                config: analysis.config.clone(),
            },
            counts: ExportCounts {
                total_records: analysis.total_records(),
                order_dates: analysis.order_date_stats,
                ship_dates: analysis.ship_date_stats,
                invalid_date_records: analysis.invalid_date_records(),
                sales_invalid: analysis.sales_invalid(),
            },
            overall: &analysis.overall,
            ship_modes: &analysis.groups,
            anomalies: &analysis.anomalies,
            correlation: &analysis.correlation,
        }
    }
}

/// Write the JSON export of `analysis` to `path`.
pub fn export_analysis_json(analysis: &ShippingAnalysis, input_file: &str, path: &Path) -> Result<()> {
    let export = ShippingAnalysisExport::new(analysis, input_file);
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize analysis")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON export: {}", path.display()))?;
    Ok(())
}

/// Write the text summary to `path`.
pub fn write_summary(analysis: &ShippingAnalysis, path: &Path) -> Result<()> {
    std::fs::write(path, render_summary(analysis))
        .with_context(|| format!("Failed to write summary: {}", path.display()))
}

/// Write a DataFrame as CSV.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}
