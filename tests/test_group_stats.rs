//! Tests for per-ship-mode delay statistics

use shiplag::pipeline::aggregate_by_group;

#[path = "common/mod.rs"]
mod common;

use common::assert_close;

#[test]
fn test_groups_ordered_by_median_then_key() {
    let keys = vec![
        Some("Standard Class"),
        Some("Standard Class"),
        Some("Same Day"),
        Some("First Class"),
        Some("Second Class"),
    ];
    let delays = vec![Some(5), Some(4), Some(0), Some(2), Some(2)];

    let stats = aggregate_by_group(&keys, &delays, 7);
    let order: Vec<&str> = stats.iter().map(|g| g.key.as_str()).collect();

    assert_eq!(
        order,
        vec!["Same Day", "First Class", "Second Class", "Standard Class"],
        "Ascending median, ties broken by key"
    );
}

#[test]
fn test_group_statistics_values() {
    let keys = vec![Some("Standard"); 6];
    let delays = vec![Some(4), Some(5), Some(4), Some(5), Some(40), Some(4)];

    let stats = aggregate_by_group(&keys, &delays, 7);
    assert_eq!(stats.len(), 1);
    let group = &stats[0];

    assert_eq!(group.count(), 6);
    assert_eq!(group.group_size, 6);
    assert_eq!(group.median(), Some(4.5));
    assert_close(group.summary.mean.unwrap(), 62.0 / 6.0, 1e-9);
    assert_eq!(group.summary.min, Some(4));
    assert_eq!(group.summary.max, Some(40));
    // sorted 4,4,4,5,5,40: q1 = 4.0, q3 = 5.0
    assert_close(group.summary.iqr.unwrap(), 1.0, 1e-9);
    assert_close(group.long_tail_rate, 1.0 / 6.0, 1e-9);
    assert_eq!(group.negative_rate, 0.0);
}

#[test]
fn test_rates_use_full_group_size() {
    // Two records, one without a delay: rates divide by 2, stats cover 1
    let keys = vec![Some("Standard Class"), Some("Standard Class")];
    let delays = vec![Some(9), None];

    let stats = aggregate_by_group(&keys, &delays, 7);
    let group = &stats[0];

    assert_eq!(group.count(), 1);
    assert_eq!(group.group_size, 2);
    assert_close(group.long_tail_rate, 0.5, 1e-12);
    assert!(group.summary.std.is_none(), "std needs two values");
}

#[test]
fn test_group_without_valid_delays_reported_empty() {
    let keys = vec![Some("Same Day"), Some("Same Day"), Some("First Class")];
    let delays = vec![None, None, Some(2)];

    let stats = aggregate_by_group(&keys, &delays, 7);

    assert_eq!(stats.len(), 2);
    // Groups without a median sort last
    assert_eq!(stats[0].key, "First Class");
    let empty = &stats[1];
    assert_eq!(empty.key, "Same Day");
    assert_eq!(empty.count(), 0);
    assert!(empty.summary.median.is_none());
    assert!(empty.summary.mean.is_none());
    assert_eq!(empty.negative_rate, 0.0);
    assert_eq!(empty.long_tail_rate, 0.0);
}

#[test]
fn test_rates_bounded_in_unit_interval() {
    let keys = vec![Some("A"), Some("A"), Some("B"), Some("B"), Some("B"), Some("C")];
    let delays = vec![Some(-2), Some(-1), Some(30), None, Some(-5), None];

    for group in aggregate_by_group(&keys, &delays, 7) {
        assert!((0.0..=1.0).contains(&group.negative_rate), "{:?}", group);
        assert!((0.0..=1.0).contains(&group.long_tail_rate), "{:?}", group);
        if group.count() == 0 {
            assert_eq!(group.negative_rate, 0.0);
            assert_eq!(group.long_tail_rate, 0.0);
        }
    }
}

#[test]
fn test_null_keys_excluded() {
    let keys = vec![None, Some("First Class")];
    let delays = vec![Some(1), Some(2)];

    let stats = aggregate_by_group(&keys, &delays, 7);

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].group_size, 1);
}

#[test]
fn test_long_tail_cutoff_is_strict() {
    let keys = vec![Some("X"); 3];
    let delays = vec![Some(7), Some(8), Some(6)];

    let stats = aggregate_by_group(&keys, &delays, 7);
    assert_close(stats[0].long_tail_rate, 1.0 / 3.0, 1e-12);
}

#[test]
fn test_empty_input() {
    let stats = aggregate_by_group(&[], &[], 7);
    assert!(stats.is_empty());
}
