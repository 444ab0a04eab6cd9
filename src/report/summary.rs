//! Plain-text shipping summary report
//!
//! The report is line-oriented and byte-for-byte deterministic for a given
//! analysis: one fact per line, `label: value` or `- key, k1=v1, k2=v2` for
//! group rows. Downstream consumers rely on the line order.

use crate::pipeline::{GroupStats, ShippingAnalysis};

pub const REPORT_TITLE: &str = "Concise Shipping Analysis Summary";
pub const SUSPICIOUS_LABEL: &str = "Suspicious records flagged: ";

const ABSENT: &str = "n/a";

/// Build the report as an ordered list of lines.
pub fn build_summary_lines(analysis: &ShippingAnalysis) -> Vec<String> {
    let long_tail = analysis.config.long_tail_days;
    let mut lines = Vec::new();

    lines.push(REPORT_TITLE.to_string());
    lines.push("-".repeat(32));
    lines.push(format!("Total records: {}", analysis.total_records()));
    lines.push(format!("Order date invalid: {}", analysis.order_date_invalid()));
    lines.push(format!("Ship date invalid: {}", analysis.ship_date_invalid()));
    lines.push(format!("Sales invalid: {}", analysis.sales_invalid()));
    lines.push(String::new());

    let overall = &analysis.overall;
    lines.push("Overall shipping delay (days):".to_string());
    lines.push(format!("- count: {}", overall.count));
    lines.push(format!("- mean: {}", fmt_f64(overall.mean, 2)));
    lines.push(format!("- median: {}", fmt_f64(overall.median, 2)));
    lines.push(format!("- std: {}", fmt_f64(overall.std, 2)));
    lines.push(format!("- min: {}", fmt_i64(overall.min)));
    lines.push(format!("- max: {}", fmt_i64(overall.max)));
    lines.push(format!("- iqr_days: {}", fmt_f64(overall.iqr, 2)));
    lines.push(String::new());

    lines.push(format!(
        "Ship Mode summary (median, IQR, neg_rate, long_rate_gt{}d):",
        long_tail
    ));
    if analysis.groups.is_empty() {
        lines.push("- none".to_string());
    }
    for group in &analysis.groups {
        lines.push(group_line(group, long_tail));
    }
    lines.push(String::new());

    lines.push(format!(
        "{}{} (threshold > {:.1} days)",
        SUSPICIOUS_LABEL, analysis.anomalies.count, analysis.anomalies.threshold.value
    ));
    lines.push(String::new());

    let corr = &analysis.correlation;
    lines.push("Spearman correlation (Sales vs Delay):".to_string());
    if corr.pairs == 0 {
        lines.push("- no valid correlation pairs".to_string());
    } else {
        lines.push(format!(
            "- correlation: {}, p-value: {}, pairs: {}",
            fmt_f64(corr.coefficient, 4),
            fmt_f64(corr.p_value, 4),
            corr.pairs
        ));
    }
    lines.push(String::new());

    lines.push("Recommended next steps:".to_string());
    lines.push("- Investigate negative-delay records and fix date-entry or ETL issues".to_string());
    lines.push(format!(
        "- Review high-variability ship modes and long-tail delays (>{} days)",
        long_tail
    ));
    lines.push(
        "- Consider prioritizing high-sales orders for faster fulfillment if correlation shows longer delays for larger orders"
            .to_string(),
    );

    lines
}

/// The report as a single newline-terminated string.
pub fn render_summary(analysis: &ShippingAnalysis) -> String {
    let mut text = build_summary_lines(analysis).join("\n");
    text.push('\n');
    text
}

fn group_line(group: &GroupStats, long_tail: i64) -> String {
    let s = &group.summary;
    format!(
        "- {}, count={}, median={}, mean={}, std={}, min={}, max={}, IQR={}, neg_rate={:.3}, long_rate_gt{}d={:.3}",
        group.key,
        s.count,
        fmt_f64(s.median, 1),
        fmt_f64(s.mean, 2),
        fmt_f64(s.std, 2),
        fmt_i64(s.min),
        fmt_i64(s.max),
        fmt_f64(s.iqr, 1),
        group.negative_rate,
        long_tail,
        group.long_tail_rate
    )
}

fn fmt_f64(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => ABSENT.to_string(),
    }
}

fn fmt_i64(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| ABSENT.to_string())
}
