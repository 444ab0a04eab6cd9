//! Shiplag: Shipping-Performance Diagnostics CLI
//!
//! Loads a retail order dataset, runs the shipping analysis and writes the
//! text summary plus chart-ready series to an output directory.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shiplag::cli::Cli;
use shiplag::pipeline::{analyze_dataframe, load_dataset};
use shiplag::report::{display_analysis, export_analysis_json, write_csv, write_summary};
use shiplag::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let quiet = cli.quiet;
    let config = cli.analysis_config();
    config.validate()?;
    let output_dir = cli.output_dir();

    if !quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&cli.input, &output_dir, &config);
    }

    // Step 1: Load dataset
    if !quiet {
        print_step_header(1, "Load Orders");
    }
    let spinner = create_spinner("Reading dataset...", quiet);
    let df = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");
    if !quiet {
        println!("\n    {} Dataset Statistics:", style("✧").cyan());
        println!("      Rows: {}", df.height());
        println!("      Columns: {}", df.width());
    }

    // Step 2: Analysis
    if !quiet {
        print_step_header(2, "Shipping Analysis");
    }
    let spinner = create_spinner("Normalizing dates and computing delays...", quiet);
    let analysis = analyze_dataframe(&df, &config)
        .with_context(|| format!("Cannot analyze {}", cli.input.display()))?;

    let invalid_dates = analysis.invalid_date_records();
    if invalid_dates > 0 || analysis.anomalies.count > 0 {
        finish_with_warning(&spinner, "Analysis complete with data-quality findings");
    } else {
        finish_with_success(&spinner, "Analysis complete");
    }

    if !quiet {
        if invalid_dates > 0 {
            print_count("record(s) with an invalid date", invalid_dates, None);
        }
        print_count(
            "suspicious record(s)",
            analysis.anomalies.count,
            Some(&format!(
                "(negative or > {:.1} days)",
                analysis.anomalies.threshold.value
            )),
        );
        if analysis.correlation.pairs == 0 {
            print_info("No valid (sales, delay) pairs for correlation");
        }
    }

    // Step 3: Write outputs
    if !quiet {
        print_step_header(3, "Save Results");
    }
    std::fs::create_dir_all(&output_dir).with_context(|| {
        format!("Failed to create output directory: {}", output_dir.display())
    })?;

    let spinner = create_spinner("Writing summary and chart series...", quiet);
    write_summary(&analysis, &output_dir.join("summary.txt"))?;

    let mut series = analysis
        .chart_series()
        .context("Failed to build chart series")?;
    write_csv(
        &mut series.delay_distribution,
        &output_dir.join("delay_distribution.csv"),
    )?;
    write_csv(
        &mut series.delay_by_ship_mode,
        &output_dir.join("delay_by_ship_mode.csv"),
    )?;
    write_csv(
        &mut series.sales_vs_delay,
        &output_dir.join("sales_vs_delay.csv"),
    )?;

    if cli.json {
        export_analysis_json(
            &analysis,
            &cli.input.display().to_string(),
            &output_dir.join("shipping_analysis.json"),
        )?;
    }

    if cli.export_records {
        let mut records = analysis
            .to_dataframe()
            .context("Failed to build record table")?;
        write_csv(&mut records, &output_dir.join("shipping_records.csv"))?;
    }
    finish_with_success(
        &spinner,
        &format!("Saved to {}", output_dir.display()),
    );

    if !quiet {
        print_success("Summary and chart series written");
        display_analysis(&analysis);
        print_completion();
    }

    Ok(())
}

/// Initialize tracing; RUST_LOG takes precedence over --verbose
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "shiplag=debug" } else { "shiplag=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
