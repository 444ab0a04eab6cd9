//! Benchmarks for the shipping analysis stages
//!
//! Run with: cargo bench --bench stats_benchmark

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use shiplag::pipeline::{
    aggregate_by_group, analyze_records, normalize_dates, spearman, AnalysisConfig, OrderRecord,
};

const SHIP_MODES: [&str; 4] = ["Same Day", "First Class", "Second Class", "Standard Class"];

/// Generate synthetic orders with a small share of dirty dates and negative delays
fn generate_records(n: usize, seed: u64) -> Vec<OrderRecord> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid start date");

    (0..n)
        .map(|_| {
            let order = start + Duration::days(rng.gen_range(0..1460));
            let mode_idx = rng.gen_range(0..SHIP_MODES.len());
            // Slower modes ship later, with an occasional long tail
            let base = mode_idx as i64 * 2;
            let delay = if rng.gen::<f64>() < 0.02 {
                rng.gen_range(-5..60)
            } else {
                base + rng.gen_range(0..3)
            };
            let ship = order + Duration::days(delay);

            let order_raw = if rng.gen::<f64>() < 0.01 {
                "unknown".to_string()
            } else {
                order.format("%m/%d/%Y").to_string()
            };

            OrderRecord::new(
                &order_raw,
                &ship.format("%m/%d/%Y").to_string(),
                rng.gen::<f64>() * 1000.0,
                SHIP_MODES[mode_idx],
            )
        })
        .collect()
}

fn benchmark_full_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_analysis");
    group.sample_size(20);

    let config = AnalysisConfig::default();
    for n_rows in [1_000, 10_000, 100_000] {
        let records = generate_records(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("records", n_rows), &records, |b, records| {
            b.iter(|| {
                let _ = analyze_records(black_box(records), black_box(&config));
            });
        });
    }

    group.finish();
}

fn benchmark_date_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("date_normalization");
    group.sample_size(20);

    let records = generate_records(50_000, 7);
    let uniform: Vec<Option<&str>> = records.iter().map(|r| r.ship_date_raw.as_deref()).collect();
    // Mix in layouts that miss the inferred format and hit the fallback
    let mixed: Vec<Option<String>> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            r.ship_date_raw.as_ref().map(|s| {
                if i % 10 == 0 {
                    format!("{} 00:00:00", s)
                } else {
                    s.clone()
                }
            })
        })
        .collect();

    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("uniform", |b| {
        b.iter(|| normalize_dates(black_box(&uniform)));
    });
    group.bench_function("mixed", |b| {
        b.iter(|| normalize_dates(black_box(&mixed)));
    });

    group.finish();
}

fn benchmark_group_and_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_and_correlation");
    group.sample_size(30);

    let mut rng = rand::rngs::StdRng::seed_from_u64(123);
    let n = 100_000;
    let keys: Vec<Option<&str>> = (0..n)
        .map(|_| Some(SHIP_MODES[rng.gen_range(0..SHIP_MODES.len())]))
        .collect();
    let delays: Vec<Option<i64>> = (0..n).map(|_| Some(rng.gen_range(-2..20))).collect();
    let sales: Vec<f64> = (0..n).map(|_| rng.gen::<f64>() * 500.0).collect();
    let delay_values: Vec<f64> = delays.iter().flatten().map(|&d| d as f64).collect();

    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("aggregate_by_group", |b| {
        b.iter(|| aggregate_by_group(black_box(&keys), black_box(&delays), black_box(7)));
    });
    group.bench_function("spearman", |b| {
        b.iter(|| spearman(black_box(&sales), black_box(&delay_values)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_full_analysis,
    benchmark_date_normalization,
    benchmark_group_and_correlation,
);
criterion_main!(benches);
