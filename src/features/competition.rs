//! Competition features.
//!
//! Duration since the nearest competitor opened, its ordinal tenure
//! bucket, and an equal-frequency distance category whose bin edges are
//! fitted once on training data and reused verbatim afterwards.

use crate::core::Record;
use crate::error::{PrepError, Result};
use crate::features::calendar::CalendarFeatures;
use crate::utils::stats;

/// Competition attributes for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompetitionFeatures {
    /// Resolved distance to the nearest competitor, in meters.
    pub distance: f64,
    /// Months the competitor has been open; <= 0 means not yet open.
    pub months_open: f64,
    /// 0 not yet open, 1 new (<12 months), 2 established (<24), 3 old.
    pub tenure: u8,
    /// 0 very close, 1 close, 2 far, 3 very far.
    pub distance_category: u8,
}

/// Quartile edges for the competition-distance category, fitted on the
/// training distribution.
///
/// Missing distances are imputed with the maximum observed distance
/// before the edges are computed, and the same fill value is reused when
/// assigning categories, so training and test rows always see identical
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBins {
    edges: [f64; 3],
    fill_value: f64,
}

impl DistanceBins {
    /// Fit quartile edges over the training distances.
    pub fn fit(distances: &[Option<f64>]) -> Result<Self> {
        let present: Vec<f64> = distances.iter().flatten().copied().collect();
        if present.is_empty() {
            return Err(PrepError::EmptyData);
        }

        let fill_value = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let resolved: Vec<f64> = distances.iter().map(|d| d.unwrap_or(fill_value)).collect();

        Ok(Self {
            edges: [
                stats::quantile(&resolved, 0.25),
                stats::quantile(&resolved, 0.5),
                stats::quantile(&resolved, 0.75),
            ],
            fill_value,
        })
    }

    /// Category for a distance, using the fitted edges and fill value.
    pub fn assign(&self, distance: Option<f64>) -> u8 {
        let v = distance.unwrap_or(self.fill_value);
        if v <= self.edges[0] {
            0
        } else if v <= self.edges[1] {
            1
        } else if v <= self.edges[2] {
            2
        } else {
            3
        }
    }

    pub fn edges(&self) -> [f64; 3] {
        self.edges
    }

    pub fn fill_value(&self) -> f64 {
        self.fill_value
    }
}

/// Months between the competitor's opening and the record's month:
/// `12*(year - since_year) + (month - since_month)`.
pub fn months_open(cal: &CalendarFeatures, since_year: i32, since_month: u32) -> f64 {
    (12 * (cal.year - since_year)) as f64 + (cal.month as f64 - since_month as f64)
}

/// Ordinal tenure bucket with left-closed/right-open boundaries, so
/// exactly 12 months is "established" and exactly 24 is "old".
pub fn tenure_bucket(months: f64) -> u8 {
    if months <= 0.0 {
        0
    } else if months < 12.0 {
        1
    } else if months < 24.0 {
        2
    } else {
        3
    }
}

/// Build competition features for one record.
///
/// Requires the competition fields resolved by the fill stage;
/// unresolved values are a `MissingColumn` contract violation.
pub fn build(
    record: &Record,
    cal: &CalendarFeatures,
    bins: &DistanceBins,
) -> Result<CompetitionFeatures> {
    let since_year = record
        .competition_open_since_year
        .ok_or(PrepError::MissingColumn {
            column: "competition_open_since_year",
        })?;
    let since_month = record
        .competition_open_since_month
        .ok_or(PrepError::MissingColumn {
            column: "competition_open_since_month",
        })?;
    let distance = record
        .competition_distance
        .ok_or(PrepError::MissingColumn {
            column: "competition_distance",
        })?;

    let months = months_open(cal, since_year, since_month);
    Ok(CompetitionFeatures {
        distance,
        months_open: months,
        tenure: tenure_bucket(months),
        distance_category: bins.assign(Some(distance)),
    })
}
