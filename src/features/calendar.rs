//! Calendar feature extraction.
//!
//! Pure, row-independent derivation of date attributes; the same date
//! always yields the same features.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Calendar attributes derived from a record's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// ISO week number.
    pub week_of_year: u32,
    /// 0 = Monday .. 6 = Sunday.
    pub weekday: u32,
    pub is_weekend: bool,
    /// day <= 5
    pub is_month_start: bool,
    /// day >= 26
    pub is_month_end: bool,
    /// 5 < day < 26
    pub is_mid_month: bool,
    pub quarter: u32,
    /// 0 = Dec-Feb, 1 = Mar-May, 2 = Jun-Aug, 3 = Sep-Nov.
    pub season: u8,
}

/// Derive all calendar features from a date.
pub fn extract(date: NaiveDate) -> CalendarFeatures {
    let day = date.day();
    let month = date.month();
    let weekday = date.weekday().num_days_from_monday();

    CalendarFeatures {
        year: date.year(),
        month,
        day,
        week_of_year: date.iso_week().week(),
        weekday,
        is_weekend: weekday >= 5,
        is_month_start: day <= 5,
        is_month_end: day >= 26,
        is_mid_month: day > 5 && day < 26,
        quarter: (month - 1) / 3 + 1,
        season: season_of_month(month),
    }
}

/// Season index for a calendar month.
pub fn season_of_month(month: u32) -> u8 {
    match month {
        12 | 1 | 2 => 0,
        3..=5 => 1,
        6..=8 => 2,
        _ => 3,
    }
}

/// Date features selectable for the exported feature matrix.
///
/// The extractor always computes the full set; this enum only controls
/// which columns the matrix export emits. `day` and `day_of_month` are
/// aliases of the same underlying value, kept as separate columns for
/// consumers that expect both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFeature {
    Year,
    Month,
    Day,
    WeekOfYear,
    Weekday,
    IsWeekend,
    DayOfMonth,
    IsMonthStart,
    IsMonthEnd,
    IsMidMonth,
    Quarter,
    Season,
}

impl DateFeature {
    /// Every date feature, in export order.
    pub const ALL: [DateFeature; 12] = [
        DateFeature::Year,
        DateFeature::Month,
        DateFeature::Day,
        DateFeature::WeekOfYear,
        DateFeature::Weekday,
        DateFeature::IsWeekend,
        DateFeature::DayOfMonth,
        DateFeature::IsMonthStart,
        DateFeature::IsMonthEnd,
        DateFeature::IsMidMonth,
        DateFeature::Quarter,
        DateFeature::Season,
    ];

    /// Column name in the exported matrix.
    pub fn name(&self) -> &'static str {
        match self {
            DateFeature::Year => "year",
            DateFeature::Month => "month",
            DateFeature::Day => "day",
            DateFeature::WeekOfYear => "week_of_year",
            DateFeature::Weekday => "weekday",
            DateFeature::IsWeekend => "is_weekend",
            DateFeature::DayOfMonth => "day_of_month",
            DateFeature::IsMonthStart => "is_month_start",
            DateFeature::IsMonthEnd => "is_month_end",
            DateFeature::IsMidMonth => "is_mid_month",
            DateFeature::Quarter => "quarter",
            DateFeature::Season => "season",
        }
    }

    /// Numeric value of this feature for a set of calendar features.
    pub fn value(&self, cal: &CalendarFeatures) -> f64 {
        match self {
            DateFeature::Year => cal.year as f64,
            DateFeature::Month => cal.month as f64,
            DateFeature::Day | DateFeature::DayOfMonth => cal.day as f64,
            DateFeature::WeekOfYear => cal.week_of_year as f64,
            DateFeature::Weekday => cal.weekday as f64,
            DateFeature::IsWeekend => cal.is_weekend as u8 as f64,
            DateFeature::IsMonthStart => cal.is_month_start as u8 as f64,
            DateFeature::IsMonthEnd => cal.is_month_end as u8 as f64,
            DateFeature::IsMidMonth => cal.is_mid_month as u8 as f64,
            DateFeature::Quarter => cal.quarter as f64,
            DateFeature::Season => cal.season as f64,
        }
    }
}
