//! Standardization of numeric feature columns.
//!
//! `ScalerParams::fit` computes per-column center and scale over training
//! data. The returned parameter object is immutable and is the only way
//! to obtain a transform, so fit-before-transform is a type-level
//! precondition rather than a runtime check; refitting simply produces a
//! new, independent object.

use serde::Deserialize;

use crate::core::{FeatureRow, FeatureTable};
use crate::error::{PrepError, Result};
use crate::utils::stats;

/// Numeric feature columns eligible for standardization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleColumn {
    CompetitionDistance,
    CompetitionOpen,
    Promo2Open,
}

impl ScaleColumn {
    /// The default column set.
    pub const DEFAULT: [ScaleColumn; 3] = [
        ScaleColumn::CompetitionDistance,
        ScaleColumn::CompetitionOpen,
        ScaleColumn::Promo2Open,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScaleColumn::CompetitionDistance => "competition_distance",
            ScaleColumn::CompetitionOpen => "competition_open",
            ScaleColumn::Promo2Open => "promo2_open",
        }
    }

    fn get(&self, row: &FeatureRow) -> f64 {
        match self {
            ScaleColumn::CompetitionDistance => row.competition.distance,
            ScaleColumn::CompetitionOpen => row.competition.months_open,
            ScaleColumn::Promo2Open => row.promotion.promo2_open,
        }
    }

    fn set(&self, row: &mut FeatureRow, value: f64) {
        match self {
            ScaleColumn::CompetitionDistance => row.competition.distance = value,
            ScaleColumn::CompetitionOpen => row.competition.months_open = value,
            ScaleColumn::Promo2Open => row.promotion.promo2_open = value,
        }
    }
}

/// Fitted standardization parameters: one (center, scale) pair per
/// column, derived exclusively from the training partition.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalerParams {
    columns: Vec<ScaleColumn>,
    centers: Vec<f64>,
    scales: Vec<f64>,
}

impl ScalerParams {
    /// Fit per-column mean and standard deviation on training data.
    ///
    /// A zero or near-zero standard deviation falls back to a scale of
    /// 1 so constant columns pass through centered instead of exploding.
    pub fn fit(table: &FeatureTable, columns: &[ScaleColumn]) -> Result<Self> {
        if table.is_empty() {
            return Err(PrepError::EmptyData);
        }
        if columns.is_empty() {
            return Err(PrepError::InvalidParameter(
                "scale column set is empty".to_string(),
            ));
        }

        let mut centers = Vec::with_capacity(columns.len());
        let mut scales = Vec::with_capacity(columns.len());
        for column in columns {
            let values: Vec<f64> = table.rows().iter().map(|row| column.get(row)).collect();
            let std = stats::standard_deviation(&values);

            centers.push(stats::mean(&values));
            scales.push(if std < 1e-10 { 1.0 } else { std });
        }

        Ok(Self {
            columns: columns.to_vec(),
            centers,
            scales,
        })
    }

    /// Standardize the fitted columns in place: `(x - center) / scale`.
    pub fn transform(&self, table: &mut FeatureTable) {
        for row in table.rows_mut() {
            for (i, column) in self.columns.iter().enumerate() {
                column.set(row, (column.get(row) - self.centers[i]) / self.scales[i]);
            }
        }
    }

    /// Map a standardized value back to the original scale:
    /// `x * scale + center`.
    pub fn inverse(&self, column: ScaleColumn, value: f64) -> Result<f64> {
        let idx = self.index_of(column)?;
        Ok(value * self.scales[idx] + self.centers[idx])
    }

    pub fn columns(&self) -> &[ScaleColumn] {
        &self.columns
    }

    pub fn center(&self, column: ScaleColumn) -> Result<f64> {
        Ok(self.centers[self.index_of(column)?])
    }

    pub fn scale(&self, column: ScaleColumn) -> Result<f64> {
        Ok(self.scales[self.index_of(column)?])
    }

    fn index_of(&self, column: ScaleColumn) -> Result<usize> {
        self.columns
            .iter()
            .position(|&c| c == column)
            .ok_or_else(|| {
                PrepError::InvalidParameter(format!("column {} was not fitted", column.name()))
            })
    }
}
