//! Raw per-store daily observations.

use chrono::NaiveDate;

/// One (store, date) observation with its store metadata already joined.
///
/// Fields that the source data may leave unset are `Option`s; the fill
/// stage resolves them before any feature arithmetic runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub store: u32,
    pub date: NaiveDate,
    /// Target; absent in test-time records.
    pub sales: Option<f64>,
    pub customers: Option<f64>,
    pub open: Option<bool>,
    /// Single-day promotion active on this date.
    pub promo: bool,
    pub school_holiday: bool,
    /// State holiday token: "0" (none), "a" (public), "b" (easter),
    /// "c" (christmas).
    pub state_holiday: String,
    pub store_type: String,
    pub assortment: String,
    pub competition_distance: Option<f64>,
    pub competition_open_since_month: Option<u32>,
    pub competition_open_since_year: Option<i32>,
    /// Store participates in the recurring promotion program.
    pub promo2: bool,
    pub promo2_since_week: Option<u32>,
    pub promo2_since_year: Option<i32>,
    /// Comma-separated month names defining recurring-promotion months.
    pub promo_interval: Option<String>,
}

impl Record {
    /// A record with every optional field unset; handy for building test
    /// and demo fixtures.
    pub fn new(store: u32, date: NaiveDate) -> Self {
        Self {
            store,
            date,
            sales: None,
            customers: None,
            open: None,
            promo: false,
            school_holiday: false,
            state_holiday: "0".to_string(),
            store_type: "a".to_string(),
            assortment: "a".to_string(),
            competition_distance: None,
            competition_open_since_month: None,
            competition_open_since_year: None,
            promo2: false,
            promo2_since_week: None,
            promo2_since_year: None,
            promo_interval: None,
        }
    }
}
