//! Per-ship-mode delay statistics

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::stats::DelaySummary;

/// Delay statistics for one value of the grouping key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub key: String,
    /// All records carrying this key, including those without a delay
    pub group_size: usize,
    /// Statistics over the records with a present delay
    #[serde(flatten)]
    pub summary: DelaySummary,
    /// Share of the group with a negative delay
    pub negative_rate: f64,
    /// Share of the group with a delay above the long-tail cutoff
    pub long_tail_rate: f64,
}

impl GroupStats {
    pub fn count(&self) -> usize {
        self.summary.count
    }

    pub fn median(&self) -> Option<f64> {
        self.summary.median
    }
}

#[derive(Default)]
struct GroupAccumulator {
    size: usize,
    delays: Vec<i64>,
    negative: usize,
    long_tail: usize,
}

/// Partition records by key and compute all statistics in one pass per group.
///
/// `keys` and `delays` are parallel. Records with a `None` key belong to no
/// group. Groups whose records all lack a delay are still reported, with
/// `count == 0` and absent statistics. The result is in report order: ascending
/// median, groups without a median last, ties broken by key.
pub fn aggregate_by_group(
    keys: &[Option<&str>],
    delays: &[Option<i64>],
    long_tail_days: i64,
) -> Vec<GroupStats> {
    let mut groups: BTreeMap<&str, GroupAccumulator> = BTreeMap::new();

    for (key, delay) in keys.iter().zip(delays.iter()) {
        let Some(key) = key else { continue };
        let acc = groups.entry(*key).or_default();
        acc.size += 1;
        if let Some(d) = *delay {
            acc.delays.push(d);
            if d < 0 {
                acc.negative += 1;
            }
            if d > long_tail_days {
                acc.long_tail += 1;
            }
        }
    }

    let mut stats: Vec<GroupStats> = groups
        .into_iter()
        .map(|(key, acc)| {
            let denominator = acc.size.max(1) as f64;
            GroupStats {
                key: key.to_string(),
                group_size: acc.size,
                summary: DelaySummary::from_delays(&acc.delays),
                negative_rate: acc.negative as f64 / denominator,
                long_tail_rate: acc.long_tail as f64 / denominator,
            }
        })
        .collect();

    stats.sort_by(compare_for_report);

    debug!(groups = stats.len(), "Aggregated delay statistics by group");

    stats
}

/// Ascending by median (absent medians last), then by key.
pub fn compare_for_report(a: &GroupStats, b: &GroupStats) -> Ordering {
    let by_median = match (a.median(), b.median()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_median.then_with(|| a.key.cmp(&b.key))
}
