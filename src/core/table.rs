//! Input and output table types.

use std::collections::HashSet;

use crate::config::PrepConfig;
use crate::core::record::Record;
use crate::error::{PrepError, Result};
use crate::features::{
    CalendarFeatures, CompetitionFeatures, EncodedCategoricals, HolidayDistances,
    PromotionFeatures,
};

/// Validated collection of raw records.
///
/// Construction rejects duplicate (store, date) pairs, so each store's
/// records form a strictly increasing date sequence once sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTable {
    records: Vec<Record>,
}

impl SalesTable {
    pub fn new(records: Vec<Record>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert((record.store, record.date)) {
                return Err(PrepError::DuplicateRecord {
                    store: record.store,
                    date: record.date,
                });
            }
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

/// One fully derived output row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub record: Record,
    pub calendar: CalendarFeatures,
    pub holiday: HolidayDistances,
    pub competition: CompetitionFeatures,
    pub promotion: PromotionFeatures,
    pub encoded: EncodedCategoricals,
}

/// Names of the non-date matrix columns, in export order.
const FIXED_COLUMNS: [&str; 15] = [
    "promo",
    "school_holiday",
    "promo2",
    "is_holiday",
    "days_to_holiday",
    "days_after_holiday",
    "competition_distance",
    "competition_open",
    "competition_duration",
    "competition_distance_category",
    "promo2_open",
    "is_promo_month",
    "store_type",
    "assortment",
    "state_holiday",
];

/// The model-ready feature table: one row per input record, in input
/// order. No stage ever removes a row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub(crate) fn new(rows: Vec<FeatureRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [FeatureRow] {
        &mut self.rows
    }

    /// Column names of the exported matrix: the configured date features
    /// followed by the fixed feature columns.
    pub fn schema(&self, config: &PrepConfig) -> Vec<&'static str> {
        let date_features = config.exported_date_features();
        let mut names = Vec::with_capacity(date_features.len() + FIXED_COLUMNS.len());
        names.extend(date_features.iter().map(|f| f.name()));
        names.extend(FIXED_COLUMNS);
        names
    }

    /// Numeric matrix, one row per record, columns per [`schema`].
    ///
    /// Sales and customers are deliberately absent: the matrix is model
    /// input, not the target.
    ///
    /// [`schema`]: FeatureTable::schema
    pub fn matrix(&self, config: &PrepConfig) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .map(|row| row_values(row, config))
            .collect()
    }
}

fn row_values(row: &FeatureRow, config: &PrepConfig) -> Vec<f64> {
    let date_features = config.exported_date_features();
    let mut values = Vec::with_capacity(date_features.len() + FIXED_COLUMNS.len());

    for feature in date_features {
        values.push(feature.value(&row.calendar));
    }

    let absent_distance = if config.legacy_zero_holiday_distance {
        0.0
    } else {
        f64::NAN
    };

    values.push(row.record.promo as u8 as f64);
    values.push(row.record.school_holiday as u8 as f64);
    values.push(row.record.promo2 as u8 as f64);
    values.push(row.holiday.is_holiday as u8 as f64);
    values.push(
        row.holiday
            .days_to_holiday
            .map(|d| d as f64)
            .unwrap_or(absent_distance),
    );
    values.push(
        row.holiday
            .days_after_holiday
            .map(|d| d as f64)
            .unwrap_or(absent_distance),
    );
    values.push(row.competition.distance);
    values.push(row.competition.months_open);
    values.push(row.competition.tenure as f64);
    values.push(row.competition.distance_category as f64);
    values.push(row.promotion.promo2_open);
    values.push(row.promotion.is_promo_month as u8 as f64);
    values.push(row.encoded.store_type as f64);
    values.push(row.encoded.assortment as f64);
    values.push(row.encoded.state_holiday as f64);

    values
}
