//! Error types for the shipping analysis.
//!
//! Only schema problems are fatal. Per-record data quality issues (bad dates,
//! unparseable sales) are carried as absent values and never surface here.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that abort an analysis run before any computation begins.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// One or more required columns are not present in the input.
    #[error("Missing required column(s): {}. Available columns: {}", .missing.join(", "), .available.join(", "))]
    MissingColumns {
        /// Required columns that were not found
        missing: Vec<String>,
        /// Columns present in the input, in input order
        available: Vec<String>,
    },

    /// The analysis configuration is not usable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A column could not be read in the expected representation.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl AnalysisError {
    /// Names of the missing columns, if this is a schema error.
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            AnalysisError::MissingColumns { missing, .. } => Some(missing),
            _ => None,
        }
    }
}
