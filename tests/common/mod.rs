//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use shiplag::pipeline::OrderRecord;
use std::path::PathBuf;
use tempfile::TempDir;

/// The four-record scenario:
/// - Second Class: delay 2
/// - Standard Class: delay 9
/// - Standard Class: unparseable order date
/// - First Class: shipped 3 days before ordering (delay -3)
pub fn create_scenario_records() -> Vec<OrderRecord> {
    vec![
        OrderRecord::new("1/1/2020", "1/3/2020", 100.0, "Second Class"),
        OrderRecord::new("1/5/2020", "1/14/2020", 250.0, "Standard Class"),
        OrderRecord::new("not a date", "1/20/2020", 75.0, "Standard Class"),
        OrderRecord::new("2/10/2020", "2/7/2020", 40.0, "First Class"),
    ]
}

/// The same scenario as a DataFrame, with currency-formatted sales text
pub fn create_scenario_dataframe() -> DataFrame {
    df! {
        "Row ID" => [1i64, 2, 3, 4],
        "Order Date" => ["1/1/2020", "1/5/2020", "not a date", "2/10/2020"],
        "Ship Date" => ["1/3/2020", "1/14/2020", "1/20/2020", "2/7/2020"],
        "Sales" => ["$100.00", "$250.00", "$75.00", "$40.00"],
        "Ship Mode" => ["Second Class", "Standard Class", "Standard Class", "First Class"],
    }
    .unwrap()
}

/// A larger, clean dataset with a known structure:
/// Same Day ships in 0 days, First Class in 2, Standard Class in 4-5,
/// plus one Standard Class order that took 40 days.
pub fn create_orders_dataframe() -> DataFrame {
    df! {
        "Order Date" => [
            "2021-03-01", "2021-03-02", "2021-03-03", "2021-03-04",
            "2021-03-05", "2021-03-06", "2021-03-07", "2021-03-08",
            "2021-03-09", "2021-03-10",
        ],
        "Ship Date" => [
            "2021-03-01", "2021-03-02", "2021-03-05", "2021-03-06",
            "2021-03-09", "2021-03-11", "2021-03-11", "2021-03-13",
            "2021-04-18", "2021-03-14",
        ],
        "Sales" => [12.5f64, 30.0, 80.0, 95.0, 150.0, 220.0, 140.0, 260.0, 900.0, 175.0],
        "Ship Mode" => [
            "Same Day", "Same Day", "First Class", "First Class",
            "Standard Class", "Standard Class", "Standard Class", "Standard Class",
            "Standard Class", "Standard Class",
        ],
    }
    .unwrap()
}

/// Generate `n` synthetic order records with delays cycling through 0..=6
pub fn create_synthetic_records(n: usize) -> Vec<OrderRecord> {
    let modes = ["First Class", "Second Class", "Standard Class", "Same Day"];
    (0..n)
        .map(|i| {
            let day = (i % 20) as u32 + 1;
            let delay = (i % 7) as u32;
            OrderRecord::new(
                &format!("5/{}/2019", day),
                &format!("5/{}/2019", day + delay),
                10.0 + i as f64,
                modes[i % modes.len()],
            )
        })
        .collect()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("orders.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("orders.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert two floats are within `tol` of each other
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "Expected {} ± {}, got {}",
        expected,
        tol,
        actual
    );
}
