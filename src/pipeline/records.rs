//! Order record extraction from a tabular dataset

use polars::prelude::*;

use super::error::AnalysisError;

pub const ORDER_DATE_COLUMN: &str = "Order Date";
pub const SHIP_DATE_COLUMN: &str = "Ship Date";
pub const SALES_COLUMN: &str = "Sales";
pub const SHIP_MODE_COLUMN: &str = "Ship Mode";

/// Columns every input dataset must carry
pub const REQUIRED_COLUMNS: [&str; 4] = [
    ORDER_DATE_COLUMN,
    SHIP_DATE_COLUMN,
    SALES_COLUMN,
    SHIP_MODE_COLUMN,
];

/// One input row, as read. Null cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_date_raw: Option<String>,
    pub ship_date_raw: Option<String>,
    /// `None` when the cell was null or could not be read as a number
    pub sales: Option<f64>,
    pub ship_mode: Option<String>,
}

impl OrderRecord {
    /// Convenience constructor for fully populated rows.
    pub fn new(order_date: &str, ship_date: &str, sales: f64, ship_mode: &str) -> Self {
        Self {
            order_date_raw: Some(order_date.to_string()),
            ship_date_raw: Some(ship_date.to_string()),
            sales: Some(sales),
            ship_mode: Some(ship_mode.to_string()),
        }
    }
}

/// Verify all required columns exist, reporting every missing one at once.
pub fn check_required_columns(df: &DataFrame) -> Result<(), AnalysisError> {
    let available: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !available.iter().any(|a| a == *name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::MissingColumns { missing, available })
    }
}

/// Read the required columns of `df` into order records.
///
/// Fails only on schema problems. Unreadable sales values become `None`.
pub fn extract_order_records(df: &DataFrame) -> Result<Vec<OrderRecord>, AnalysisError> {
    check_required_columns(df)?;

    let order_dates = string_values(df, ORDER_DATE_COLUMN)?;
    let ship_dates = string_values(df, SHIP_DATE_COLUMN)?;
    let ship_modes = string_values(df, SHIP_MODE_COLUMN)?;
    let sales = sales_values(df)?;

    let records = order_dates
        .into_iter()
        .zip(ship_dates)
        .zip(sales)
        .zip(ship_modes)
        .map(
            |(((order_date_raw, ship_date_raw), sales), ship_mode)| OrderRecord {
                order_date_raw,
                ship_date_raw,
                sales,
                ship_mode,
            },
        )
        .collect();

    Ok(records)
}

/// Parse a sales cell that may be currency-formatted text (e.g. `"$1,234.50"`).
pub fn parse_sales(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, AnalysisError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();
    Ok(values)
}

fn sales_values(df: &DataFrame) -> Result<Vec<Option<f64>>, AnalysisError> {
    let column = df.column(SALES_COLUMN)?;

    if column.dtype().is_primitive_numeric() {
        let float_col = column.cast(&DataType::Float64)?;
        let values = float_col
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        return Ok(values);
    }

    let text_col = column.cast(&DataType::String)?;
    let values = text_col
        .str()?
        .into_iter()
        .map(|v| v.and_then(parse_sales))
        .collect();
    Ok(values)
}
