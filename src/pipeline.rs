//! Pipeline orchestration.
//!
//! Applies the feature stages in a fixed order to training data and,
//! optionally, test data. The distance bins and the scaler are fitted
//! exactly once, on training data, and reused for both tables; nothing
//! else crosses the train/test boundary.

use tracing::info;

use crate::config::PrepConfig;
use crate::core::{FeatureRow, FeatureTable, Record, SalesTable};
use crate::error::Result;
use crate::features::{
    calendar, competition, encoding, holiday, promotion, DistanceBins, IntervalCache,
};
use crate::fill;
use crate::transform::ScalerParams;

/// Result of a preprocessing run.
///
/// The fitted parameters are exposed so callers can verify that test
/// rows were transformed with the training fit, persist them, or apply
/// them to later batches.
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    pub train: FeatureTable,
    pub test: Option<FeatureTable>,
    pub bins: DistanceBins,
    pub scaler: ScalerParams,
}

/// Fixed-order feature pipeline.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    config: PrepConfig,
}

impl Preprocessor {
    pub fn new(config: PrepConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Run the pipeline over training data and, if given, test data.
    ///
    /// Stage order per table: fill, calendar, holiday distances,
    /// competition, promotion, encoding; then the train-fitted scaler is
    /// applied to both tables. A structural failure in any stage aborts
    /// the whole run with no partial output.
    pub fn preprocess(&self, train: SalesTable, test: Option<SalesTable>) -> Result<Preprocessed> {
        let mut train_records = train.into_records();
        fill::resolve_missing(&mut train_records, &self.config.fill);

        let mut test_records = test.map(SalesTable::into_records);
        if let Some(records) = test_records.as_mut() {
            fill::resolve_missing(records, &self.config.fill);
        }

        let train_distances: Vec<Option<f64>> = train_records
            .iter()
            .map(|r| r.competition_distance)
            .collect();
        let bins = DistanceBins::fit(&train_distances)?;

        let mut train_table = self.derive(train_records, &bins)?;
        let mut test_table = test_records
            .map(|records| self.derive(records, &bins))
            .transpose()?;

        let scaler = ScalerParams::fit(&train_table, &self.config.scale_columns)?;
        scaler.transform(&mut train_table);
        if let Some(table) = test_table.as_mut() {
            scaler.transform(table);
        }

        info!(
            train_rows = train_table.len(),
            test_rows = test_table.as_ref().map_or(0, FeatureTable::len),
            "preprocessing complete"
        );

        Ok(Preprocessed {
            train: train_table,
            test: test_table,
            bins,
            scaler,
        })
    }

    /// Apply the per-table feature stages in order. Every stage consumes
    /// the whole table and keeps row count and order intact.
    fn derive(&self, records: Vec<Record>, bins: &DistanceBins) -> Result<FeatureTable> {
        let calendars: Vec<_> = records.iter().map(|r| calendar::extract(r.date)).collect();
        info!(rows = records.len(), "calendar features extracted");

        let holidays = holiday::distances(&records);
        info!(rows = records.len(), "holiday distances calculated");

        let competitions = records
            .iter()
            .zip(&calendars)
            .map(|(r, c)| competition::build(r, c, bins))
            .collect::<Result<Vec<_>>>()?;
        info!(rows = records.len(), "competition features built");

        let mut cache = IntervalCache::new();
        let promotions = records
            .iter()
            .zip(&calendars)
            .map(|(r, c)| promotion::build(r, c, &mut cache))
            .collect::<Result<Vec<_>>>()?;
        info!(rows = records.len(), "promotion features built");

        let encodings = records
            .iter()
            .map(encoding::encode)
            .collect::<Result<Vec<_>>>()?;
        info!(rows = records.len(), "categorical features encoded");

        let rows: Vec<FeatureRow> = records
            .into_iter()
            .zip(calendars)
            .zip(holidays)
            .zip(competitions)
            .zip(promotions)
            .zip(encodings)
            .map(
                |(((((record, calendar), holiday), competition), promotion), encoded)| {
                    FeatureRow {
                        record,
                        calendar,
                        holiday,
                        competition,
                        promotion,
                        encoded,
                    }
                },
            )
            .collect();

        Ok(FeatureTable::new(rows))
    }
}
