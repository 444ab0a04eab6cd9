//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::AnalysisConfig;

/// Shiplag - Shipping-performance diagnostics for retail order data
#[derive(Parser, Debug)]
#[command(name = "shiplag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet) with 'Order Date', 'Ship Date',
    /// 'Sales' and 'Ship Mode' columns
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for the summary and chart series.
    /// Defaults to a 'visuals' directory next to the input file.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Delays strictly above this many days count toward the long-tail rate
    #[arg(long, default_value = "7")]
    pub long_tail_days: i64,

    /// Standard deviations above the median for the suspicious-delay threshold
    #[arg(long, default_value = "3.0", value_parser = validate_std_multiplier)]
    pub std_multiplier: f64,

    /// Days added to the median when the standard deviation is undefined
    #[arg(long, default_value = "30")]
    pub fallback_offset_days: f64,

    /// Threshold in days when no valid delay exists
    #[arg(long, default_value = "30")]
    pub fallback_threshold_days: f64,

    /// Lower clip bound (days) for the delay distribution series
    #[arg(long, default_value = "-5", allow_negative_numbers = true)]
    pub clip_min: i64,

    /// Upper clip bound (days) for the delay distribution series
    #[arg(long, default_value = "30", allow_negative_numbers = true)]
    pub clip_max: i64,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Also write the full result set as shipping_analysis.json
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Also write the enriched per-record table as shipping_records.csv
    #[arg(long, default_value = "false")]
    pub export_records: bool,

    /// Suppress styled terminal output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Analysis configuration assembled from the threshold flags.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            long_tail_days: self.long_tail_days,
            std_multiplier: self.std_multiplier,
            fallback_offset_days: self.fallback_offset_days,
            fallback_threshold_days: self.fallback_threshold_days,
            histogram_clip_min: self.clip_min,
            histogram_clip_max: self.clip_max,
        }
    }

    /// Get the output directory, deriving it from the input if not explicitly provided.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            let parent = self
                .input
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."));
            parent.join("visuals")
        })
    }
}

/// Validator for std_multiplier parameter
fn validate_std_multiplier(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value < 0.0 {
        Err(format!(
            "std_multiplier must be a non-negative number, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
