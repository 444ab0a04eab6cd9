//! Date normalization with a two-tier parsing strategy
//!
//! A single format is inferred from the first non-blank value and applied to
//! the whole column. Values that do not match it are retried one by one with a
//! permissive parser. Nothing here fails: unparseable input becomes
//! [`ParsedDate::Invalid`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, warn};

/// Result of normalizing one raw date value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Parsed(NaiveDateTime),
    Invalid,
}

impl ParsedDate {
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            ParsedDate::Parsed(ts) => Some(*ts),
            ParsedDate::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ParsedDate::Invalid)
    }
}

/// How the values of one column were resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateParseStats {
    /// Parsed with the inferred column format
    pub fast: usize,
    /// Parsed by the permissive per-value fallback
    pub fallback: usize,
    /// Not parseable (including blank and null cells)
    pub invalid: usize,
}

/// A normalized date column, parallel to its raw input
#[derive(Debug, Clone)]
pub struct NormalizedDates {
    pub values: Vec<ParsedDate>,
    pub stats: DateParseStats,
    /// Format inferred for the fast pass, if any layout matched the sample
    pub inferred_format: Option<&'static str>,
}

impl NormalizedDates {
    pub fn invalid_count(&self) -> usize {
        self.stats.invalid
    }
}

/// Layouts considered when inferring a column-wide format: (format, has_time)
///
/// Numeric layouts are month-first only. Any value one of these accepts must
/// resolve to the same timestamp through [`parse_permissive`], so a value
/// never changes meaning depending on which tier parsed it.
const FAST_FORMATS: &[(&str, bool)] = &[
    ("%m/%d/%Y", false),
    ("%Y-%m-%d", false),
    ("%Y-%m-%d %H:%M:%S", true),
    ("%Y-%m-%dT%H:%M:%S", true),
    ("%m/%d/%Y %H:%M", true),
    ("%m-%d-%Y", false),
    ("%Y/%m/%d", false),
    ("%m.%d.%Y", false),
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%B %d %Y %H:%M:%S",
    "%B %d %Y %H:%M",
    "%B %d %Y %I:%M %p",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
];

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d/%m/%Y",
    "%d/%m/%y",
    "%m-%d-%Y",
    "%m-%d-%y",
    "%d-%m-%Y",
    "%d-%m-%y",
    "%m.%d.%Y",
    "%m.%d.%y",
    "%d.%m.%Y",
    "%d.%m.%y",
    "%B %d %Y",
    "%B %d %y",
    "%d %B %Y",
    "%d %B %y",
    "%b %d %Y",
    "%d %b %Y",
    "%Y %B %d",
    "%d-%b-%Y",
    "%d-%b-%y",
    "%b-%d-%Y",
];

const WEEKDAYS: &[&str] = &[
    "mon", "tue", "tues", "wed", "thu", "thur", "thurs", "fri", "sat", "sun", "monday",
    "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Normalize a column of raw date text.
pub fn normalize_dates<S: AsRef<str>>(raw: &[Option<S>]) -> NormalizedDates {
    let sample = raw
        .iter()
        .filter_map(|v| v.as_ref().map(|s| s.as_ref().trim()))
        .find(|s| !s.is_empty());
    let inferred_format = sample.and_then(infer_format);

    let mut stats = DateParseStats::default();
    let values: Vec<ParsedDate> = raw
        .iter()
        .map(|value| {
            let text = match value.as_ref().map(|s| s.as_ref().trim()) {
                Some(t) if !t.is_empty() => t,
                _ => {
                    stats.invalid += 1;
                    return ParsedDate::Invalid;
                }
            };

            if let Some(ts) = inferred_format.and_then(|(fmt, has_time)| {
                parse_with_format(text, fmt, has_time)
            }) {
                stats.fast += 1;
                return ParsedDate::Parsed(ts);
            }

            match parse_permissive(text) {
                Some(ts) => {
                    stats.fallback += 1;
                    ParsedDate::Parsed(ts)
                }
                None => {
                    stats.invalid += 1;
                    ParsedDate::Invalid
                }
            }
        })
        .collect();

    if sample.is_some() && inferred_format.is_none() {
        warn!(
            values = raw.len(),
            "No common date layout matched the column sample; using per-value parsing"
        );
    }
    debug!(
        format = inferred_format.map(|(f, _)| f).unwrap_or("none"),
        fast = stats.fast,
        fallback = stats.fallback,
        invalid = stats.invalid,
        "Normalized date column"
    );

    NormalizedDates {
        values,
        stats,
        inferred_format: inferred_format.map(|(fmt, _)| fmt),
    }
}

/// Parse one value with the permissive, layout-tolerant parser.
///
/// Accepts RFC 3339, RFC 2822, numeric layouts in month-first and day-first
/// order, month names (with optional weekday, ordinal suffixes and commas),
/// and two-digit years.
pub fn parse_permissive(raw: &str) -> Option<NaiveDateTime> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(&collapsed) {
        return Some(dt.naive_utc()).filter(is_plausible);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&collapsed) {
        return Some(dt.naive_utc()).filter(is_plausible);
    }

    let cleaned = clean_textual_date(&collapsed);

    FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| parse_with_format(&cleaned, fmt, true))
        .or_else(|| {
            FALLBACK_DATE_FORMATS
                .iter()
                .find_map(|fmt| parse_with_format(&cleaned, fmt, false))
        })
}

fn infer_format(sample: &str) -> Option<(&'static str, bool)> {
    FAST_FORMATS
        .iter()
        .copied()
        .find(|(fmt, has_time)| parse_with_format(sample, fmt, *has_time).is_some())
}

fn parse_with_format(text: &str, fmt: &str, has_time: bool) -> Option<NaiveDateTime> {
    let parsed = if has_time {
        NaiveDateTime::parse_from_str(text, fmt).ok()
    } else {
        NaiveDate::parse_from_str(text, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    };
    parsed.filter(is_plausible)
}

// `%Y` happily reads "20" as year 20; such matches must fall through to `%y`.
fn is_plausible(ts: &NaiveDateTime) -> bool {
    use chrono::Datelike;
    (1000..=9999).contains(&ts.year())
}

/// Drop commas, a leading weekday and ordinal suffixes ("3rd" -> "3").
fn clean_textual_date(text: &str) -> String {
    let without_commas = text.replace(',', " ");
    let mut tokens: Vec<&str> = without_commas.split_whitespace().collect();

    if let Some(first) = tokens.first() {
        let lowered = first.trim_end_matches('.').to_ascii_lowercase();
        if tokens.len() > 1 && WEEKDAYS.contains(&lowered.as_str()) {
            tokens.remove(0);
        }
    }

    tokens
        .into_iter()
        .map(strip_ordinal_suffix)
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_ordinal_suffix(token: &str) -> &str {
    let lowered = token.to_ascii_lowercase();
    for suffix in ["st", "nd", "rd", "th"] {
        if lowered.ends_with(suffix) && token.len() > suffix.len() {
            let digits = &token[..token.len() - suffix.len()];
            if digits.chars().all(|c| c.is_ascii_digit()) {
                return digits;
            }
        }
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_infer_format_month_first() {
        assert_eq!(infer_format("11/8/2016"), Some(("%m/%d/%Y", false)));
        assert_eq!(infer_format("2016-11-08"), Some(("%Y-%m-%d", false)));
        assert_eq!(infer_format("yesterday"), None);
    }

    #[test]
    fn test_two_digit_year_not_read_as_year_20() {
        assert_eq!(parse_permissive("1/5/20"), Some(ymd(2020, 1, 5)));
    }

    #[test]
    fn test_day_first_fallback_when_month_invalid() {
        assert_eq!(parse_permissive("25/12/2020"), Some(ymd(2020, 12, 25)));
    }

    #[test]
    fn test_textual_month_with_weekday_and_ordinal() {
        assert_eq!(
            parse_permissive("Tuesday, March 3rd, 2020"),
            Some(ymd(2020, 3, 3))
        );
        assert_eq!(parse_permissive("3 Mar 2020"), Some(ymd(2020, 3, 3)));
    }

    #[test]
    fn test_strip_ordinal_suffix_keeps_words() {
        assert_eq!(strip_ordinal_suffix("21st"), "21");
        assert_eq!(strip_ordinal_suffix("August"), "August");
        assert_eq!(strip_ordinal_suffix("th"), "th");
    }

    #[test]
    fn test_fast_layouts_agree_with_permissive_parser() {
        // Day and month both <= 12, so a day-first reading would differ
        let ts = ymd(2020, 1, 2) + chrono::Duration::seconds(3 * 3600 + 4 * 60 + 5);
        for (fmt, has_time) in FAST_FORMATS {
            let text = ts.format(fmt).to_string();
            let fast = parse_with_format(&text, fmt, *has_time);
            assert_eq!(fast.map(|t| t.date()), Some(ts.date()), "{} via {}", text, fmt);
            assert_eq!(parse_permissive(&text), fast, "{} via {}", text, fmt);
        }
    }

    #[test]
    fn test_rfc3339_offset_converted_to_utc() {
        let ts = parse_permissive("2020-01-01T23:00:00-02:00").unwrap();
        assert_eq!(ts, ymd(2020, 1, 2).checked_add_signed(chrono::Duration::hours(1)).unwrap());
    }
}
