//! Styled terminal rendering of an analysis

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{ShippingAnalysis, ThresholdRule};

/// Print the overview and per-ship-mode tables.
pub fn display_analysis(analysis: &ShippingAnalysis) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("SHIPPING SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    print_indented(&overview_table(analysis));

    println!();
    println!(
        "    {} {}",
        style("🚚").cyan(),
        style("DELAY BY SHIP MODE").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    if analysis.groups.is_empty() {
        println!("      {}", style("No ship modes with data").dim());
    } else {
        print_indented(&group_table(analysis));
    }
}

fn overview_table(analysis: &ShippingAnalysis) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("📁 Records"),
        Cell::new(analysis.total_records()),
    ]);
    table.add_row(vec![
        Cell::new("📅 Invalid order dates"),
        count_cell(analysis.order_date_invalid()),
    ]);
    table.add_row(vec![
        Cell::new("📅 Invalid ship dates"),
        count_cell(analysis.ship_date_invalid()),
    ]);
    table.add_row(vec![
        Cell::new("💲 Invalid sales"),
        count_cell(analysis.sales_invalid()),
    ]);
    table.add_row(vec![
        Cell::new("⏱️  Valid delays"),
        Cell::new(analysis.overall.count),
    ]);

    let threshold = &analysis.anomalies.threshold;
    let rule = match threshold.rule {
        ThresholdRule::MedianPlusStd => "median + k·std",
        ThresholdRule::MedianPlusOffset => "median + offset",
        ThresholdRule::Fixed => "fixed",
    };
    table.add_row(vec![
        Cell::new("🚩 Suspicious records"),
        count_cell(analysis.anomalies.count).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("📏 Threshold"),
        Cell::new(format!("> {:.1} days ({})", threshold.value, rule)),
    ]);

    let corr = &analysis.correlation;
    let corr_text = match (corr.coefficient, corr.p_value) {
        (Some(r), Some(p)) => format!("{:.4} (p={:.4})", r, p),
        (Some(r), None) => format!("{:.4}", r),
        _ => "n/a".to_string(),
    };
    table.add_row(vec![
        Cell::new("🔗 Spearman (sales vs delay)"),
        Cell::new(corr_text).fg(Color::Cyan),
    ]);

    table
}

fn group_table(analysis: &ShippingAnalysis) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        ["Ship Mode", "Count", "Median", "Mean", "Std", "IQR", "Neg %", "Long-tail %"]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );

    let opt = |v: Option<f64>, p: usize| {
        v.map(|x| format!("{:.*}", p, x))
            .unwrap_or_else(|| "-".to_string())
    };

    for group in &analysis.groups {
        let s = &group.summary;
        table.add_row(vec![
            Cell::new(&group.key),
            Cell::new(s.count).set_alignment(CellAlignment::Right),
            Cell::new(opt(s.median, 1)).set_alignment(CellAlignment::Right),
            Cell::new(opt(s.mean, 2)).set_alignment(CellAlignment::Right),
            Cell::new(opt(s.std, 2)).set_alignment(CellAlignment::Right),
            Cell::new(opt(s.iqr, 1)).set_alignment(CellAlignment::Right),
            rate_cell(group.negative_rate),
            rate_cell(group.long_tail_rate),
        ]);
    }

    table
}

fn count_cell(count: usize) -> Cell {
    Cell::new(count).fg(if count == 0 { Color::White } else { Color::Red })
}

fn rate_cell(rate: f64) -> Cell {
    let color = if rate > 0.10 {
        Color::Red
    } else if rate > 0.0 {
        Color::Yellow
    } else {
        Color::Green
    };
    Cell::new(format!("{:.1}%", rate * 100.0))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
