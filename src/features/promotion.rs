//! Recurring-promotion (Promo2) features.
//!
//! Duration of a store's recurring promotion program and whether the
//! record's calendar month falls inside the store's promotion interval.
//! Interval strings are parsed once per distinct value, which is
//! semantically identical to per-row parsing but avoids re-tokenizing the
//! same handful of strings for every record.

use std::collections::HashMap;

use tracing::warn;

use crate::core::Record;
use crate::error::{PrepError, Result};
use crate::features::calendar::CalendarFeatures;

/// Recurring-promotion attributes for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromotionFeatures {
    /// Months since the recurring promotion program started:
    /// `12*(year - since_year) + (week_of_year - since_week)/4`.
    pub promo2_open: f64,
    /// The record's month is one of the interval's promotion months.
    pub is_promo_month: bool,
}

/// Per-distinct-value cache of parsed promotion intervals.
///
/// An unparseable interval is cached as `None` after a single warning, so
/// every row carrying it keeps `is_promo_month = false` without repeating
/// the log line.
#[derive(Debug, Default)]
pub struct IntervalCache {
    parsed: HashMap<String, Option<Vec<u32>>>,
}

impl IntervalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Month numbers for an interval string, parsing on first sight.
    pub fn months(&mut self, interval: &str) -> Option<&[u32]> {
        self.parsed
            .entry(interval.to_string())
            .or_insert_with(|| match parse_interval(interval) {
                Ok(months) => Some(months),
                Err(token) => {
                    warn!(
                        interval,
                        token = %token,
                        "unknown month token in promo interval; affected rows keep is_promo_month = 0"
                    );
                    None
                }
            })
            .as_deref()
    }
}

/// Parse a comma-separated month list into month numbers.
///
/// Tokens are whitespace-trimmed and matched case-sensitively against
/// both abbreviated and full month names. Returns the offending token on
/// failure.
pub fn parse_interval(interval: &str) -> std::result::Result<Vec<u32>, String> {
    interval
        .split(',')
        .map(|token| {
            let token = token.trim();
            month_number(token).ok_or_else(|| token.to_string())
        })
        .collect()
}

fn month_number(token: &str) -> Option<u32> {
    match token {
        "Jan" | "January" => Some(1),
        "Feb" | "February" => Some(2),
        "Mar" | "March" => Some(3),
        "Apr" | "April" => Some(4),
        "May" => Some(5),
        "Jun" | "June" => Some(6),
        "Jul" | "July" => Some(7),
        "Aug" | "August" => Some(8),
        "Sep" | "Sept" | "September" => Some(9),
        "Oct" | "October" => Some(10),
        "Nov" | "November" => Some(11),
        "Dec" | "December" => Some(12),
        _ => None,
    }
}

/// Build promotion features for one record.
///
/// Requires the promo2 origin fields resolved by the fill stage. An
/// unset or empty interval simply means no promotion months.
pub fn build(
    record: &Record,
    cal: &CalendarFeatures,
    cache: &mut IntervalCache,
) -> Result<PromotionFeatures> {
    let since_year = record.promo2_since_year.ok_or(PrepError::MissingColumn {
        column: "promo2_since_year",
    })?;
    let since_week = record.promo2_since_week.ok_or(PrepError::MissingColumn {
        column: "promo2_since_week",
    })?;

    let promo2_open = (12 * (cal.year - since_year)) as f64
        + (cal.week_of_year as f64 - since_week as f64) / 4.0;

    let is_promo_month = match record.promo_interval.as_deref() {
        None => false,
        Some(s) if s.trim().is_empty() => false,
        Some(s) => cache
            .months(s)
            .map_or(false, |months| months.contains(&cal.month)),
    };

    Ok(PromotionFeatures {
        promo2_open,
        is_promo_month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::calendar;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn cal(y: i32, m: u32, d: u32) -> CalendarFeatures {
        calendar::extract(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn record_with_interval(interval: Option<&str>) -> Record {
        let mut r = Record::new(1, NaiveDate::from_ymd_opt(2021, 4, 10).unwrap());
        r.promo2_since_year = Some(2020);
        r.promo2_since_week = Some(1);
        r.promo_interval = interval.map(str::to_string);
        r
    }

    #[test]
    fn interval_month_match() {
        let mut cache = IntervalCache::new();
        let record = record_with_interval(Some("Jan,Apr,Jul,Oct"));

        let april = build(&record, &cal(2021, 4, 10), &mut cache).unwrap();
        assert!(april.is_promo_month);

        let may = build(&record, &cal(2021, 5, 10), &mut cache).unwrap();
        assert!(!may.is_promo_month);
    }

    #[test]
    fn full_month_names_and_sept_are_recognized() {
        assert_eq!(parse_interval("January,April"), Ok(vec![1, 4]));
        assert_eq!(parse_interval("Sept"), Ok(vec![9]));
        assert_eq!(parse_interval("Feb,May,Aug,Nov"), Ok(vec![2, 5, 8, 11]));
    }

    #[test]
    fn tokens_are_trimmed_but_case_sensitive() {
        assert_eq!(parse_interval(" Jan , Apr "), Ok(vec![1, 4]));
        assert_eq!(parse_interval("jan"), Err("jan".to_string()));
    }

    #[test]
    fn unknown_token_disables_the_flag_without_failing() {
        let mut cache = IntervalCache::new();
        let record = record_with_interval(Some("Jan,Splurge,Jul"));

        let features = build(&record, &cal(2021, 1, 10), &mut cache).unwrap();
        assert!(!features.is_promo_month);
    }

    #[test]
    fn unset_or_empty_interval_means_no_promo_month() {
        let mut cache = IntervalCache::new();

        let unset = record_with_interval(None);
        assert!(!build(&unset, &cal(2021, 4, 10), &mut cache).unwrap().is_promo_month);

        let empty = record_with_interval(Some(""));
        assert!(!build(&empty, &cal(2021, 4, 10), &mut cache).unwrap().is_promo_month);
    }

    #[test]
    fn distinct_intervals_parse_once() {
        let mut cache = IntervalCache::new();
        let record = record_with_interval(Some("Jan,Apr,Jul,Oct"));

        for month in 1..=12 {
            build(&record, &cal(2021, month, 10), &mut cache).unwrap();
        }
        assert_eq!(cache.parsed.len(), 1);
    }

    #[test]
    fn promo2_open_formula() {
        let mut cache = IntervalCache::new();
        // Since 2020 week 1; record in 2021, ISO week 5.
        let record = record_with_interval(None);
        let features = build(&record, &cal(2021, 2, 3), &mut cache).unwrap();

        assert_relative_eq!(features.promo2_open, 13.0, epsilon = 1e-10);
    }

    #[test]
    fn unresolved_promo2_fields_are_a_contract_violation() {
        let mut cache = IntervalCache::new();
        let record = Record::new(1, NaiveDate::from_ymd_opt(2021, 4, 10).unwrap());

        let err = build(&record, &cal(2021, 4, 10), &mut cache).unwrap_err();
        assert_eq!(
            err,
            PrepError::MissingColumn {
                column: "promo2_since_year"
            }
        );
    }
}
