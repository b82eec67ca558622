//! Holiday distance calculation.
//!
//! For every record, the signed day distance to the nearest holiday
//! before and after it at the same store. Records are partitioned by
//! store, each partition is sorted by date once, and distances come from
//! a binary search over that store's sorted holiday dates, so the cost is
//! O(n log n) per store instead of the quadratic per-record scan.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::Record;

/// Holiday indicator and day distances for one record.
///
/// `None` means no qualifying holiday exists at that store in the given
/// direction. Both lookups use strict inequalities: a record that is
/// itself a holiday measures distances to *other* holiday dates, never 0
/// to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HolidayDistances {
    pub is_holiday: bool,
    /// Days until the next holiday strictly after this date.
    pub days_to_holiday: Option<i64>,
    /// Days since the last holiday strictly before this date.
    pub days_after_holiday: Option<i64>,
}

impl HolidayDistances {
    /// Forward distance with the compatibility default of 0 when no
    /// holiday follows.
    pub fn days_to_holiday_or_zero(&self) -> i64 {
        self.days_to_holiday.unwrap_or(0)
    }

    /// Backward distance with the compatibility default of 0 when no
    /// holiday precedes.
    pub fn days_after_holiday_or_zero(&self) -> i64 {
        self.days_after_holiday.unwrap_or(0)
    }
}

/// Whether a state-holiday token marks a holiday of any type.
pub fn is_holiday_token(state_holiday: &str) -> bool {
    state_holiday != "0"
}

/// Compute holiday distances for every record, index-aligned with the
/// input slice. Stores with no holidays get `None` in both directions.
pub fn distances(records: &[Record]) -> Vec<HolidayDistances> {
    let mut by_store: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (idx, record) in records.iter().enumerate() {
        by_store.entry(record.store).or_default().push(idx);
    }

    let mut out: Vec<HolidayDistances> = records
        .iter()
        .map(|r| HolidayDistances {
            is_holiday: is_holiday_token(&r.state_holiday),
            ..HolidayDistances::default()
        })
        .collect();

    for indices in by_store.values_mut() {
        indices.sort_by_key(|&i| records[i].date);

        let holidays: Vec<NaiveDate> = indices
            .iter()
            .filter(|&&i| out[i].is_holiday)
            .map(|&i| records[i].date)
            .collect();
        if holidays.is_empty() {
            continue;
        }

        for &i in indices.iter() {
            let date = records[i].date;

            let next = holidays.partition_point(|&h| h <= date);
            if next < holidays.len() {
                out[i].days_to_holiday = Some((holidays[next] - date).num_days());
            }

            let prev = holidays.partition_point(|&h| h < date);
            if prev > 0 {
                out[i].days_after_holiday = Some((date - holidays[prev - 1]).num_days());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(store: u32, d: NaiveDate, holiday: bool) -> Record {
        let mut r = Record::new(store, d);
        if holiday {
            r.state_holiday = "a".to_string();
        }
        r
    }

    #[test]
    fn single_holiday_before_record() {
        // Store 1: holiday on Jan 1, records through Jan 10, no later holiday.
        let records: Vec<Record> = (1..=10)
            .map(|d| record(1, date(2023, 1, d), d == 1))
            .collect();

        let result = distances(&records);
        let jan5 = &result[4];

        assert_eq!(jan5.days_after_holiday, Some(4));
        assert_eq!(jan5.days_to_holiday, None);
        assert_eq!(jan5.days_to_holiday_or_zero(), 0);
        assert_eq!(jan5.days_after_holiday_or_zero(), 4);
    }

    #[test]
    fn holiday_record_measures_other_holidays() {
        let records = vec![
            record(1, date(2023, 1, 1), true),
            record(1, date(2023, 1, 4), true),
            record(1, date(2023, 1, 8), true),
        ];

        let result = distances(&records);

        // The middle holiday sees its neighbors, not itself.
        assert_eq!(result[1].days_after_holiday, Some(3));
        assert_eq!(result[1].days_to_holiday, Some(4));
        assert!(result[1].is_holiday);

        // The first holiday has nothing before it.
        assert_eq!(result[0].days_after_holiday, None);
        assert_eq!(result[0].days_to_holiday, Some(3));
    }

    #[test]
    fn store_without_holidays_defaults_everywhere() {
        let records: Vec<Record> = (1..=5).map(|d| record(3, date(2023, 2, d), false)).collect();

        for dist in distances(&records) {
            assert!(!dist.is_holiday);
            assert_eq!(dist.days_to_holiday, None);
            assert_eq!(dist.days_after_holiday, None);
            assert_eq!(dist.days_to_holiday_or_zero(), 0);
        }
    }

    #[test]
    fn stores_are_independent() {
        // Store 1 has a holiday, store 2 does not; store 2 must not see it.
        let records = vec![
            record(1, date(2023, 1, 1), true),
            record(1, date(2023, 1, 2), false),
            record(2, date(2023, 1, 2), false),
        ];

        let result = distances(&records);
        assert_eq!(result[1].days_after_holiday, Some(1));
        assert_eq!(result[2].days_after_holiday, None);
    }

    #[test]
    fn unsorted_input_order_does_not_matter() {
        let records = vec![
            record(1, date(2023, 1, 9), false),
            record(1, date(2023, 1, 1), true),
            record(1, date(2023, 1, 5), false),
        ];

        let result = distances(&records);
        assert_eq!(result[0].days_after_holiday, Some(8));
        assert_eq!(result[2].days_after_holiday, Some(4));
    }

    #[test]
    fn distances_are_never_negative() {
        let records = vec![
            record(1, date(2023, 1, 2), false),
            record(1, date(2023, 1, 3), true),
            record(1, date(2023, 1, 7), false),
            record(1, date(2023, 1, 11), true),
        ];

        for dist in distances(&records) {
            if let Some(days) = dist.days_to_holiday {
                assert!(days > 0);
            }
            if let Some(days) = dist.days_after_holiday {
                assert!(days > 0);
            }
        }
    }
}
