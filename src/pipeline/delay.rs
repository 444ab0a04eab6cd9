//! Shipping delay computation

use chrono::NaiveDateTime;

use super::dates::ParsedDate;

/// Whole days from `order_date` to `ship_date`, truncated toward zero.
///
/// Absent when either side is absent. Negative values (shipped before
/// ordered) are returned as-is.
pub fn shipping_delay_days(
    order_date: Option<NaiveDateTime>,
    ship_date: Option<NaiveDateTime>,
) -> Option<i64> {
    match (order_date, ship_date) {
        (Some(order), Some(ship)) => Some(ship.signed_duration_since(order).num_days()),
        _ => None,
    }
}

/// Delays for paired normalized date columns.
pub fn compute_delays(order_dates: &[ParsedDate], ship_dates: &[ParsedDate]) -> Vec<Option<i64>> {
    order_dates
        .iter()
        .zip(ship_dates.iter())
        .map(|(order, ship)| shipping_delay_days(order.timestamp(), ship.timestamp()))
        .collect()
}

/// Present delay values only, in input order.
pub fn present_delays(delays: &[Option<i64>]) -> Vec<i64> {
    delays.iter().flatten().copied().collect()
}
