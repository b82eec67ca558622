//! Pipeline configuration.
//!
//! Every field is optional in the source document; a partial or absent
//! configuration falls back to computing all documented features with
//! the documented defaults.

use serde::Deserialize;

use crate::features::calendar::DateFeature;
use crate::transform::scale::ScaleColumn;

/// Fill policy for a missing numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillPolicy {
    /// Median of the values present in the same table.
    Median,
    /// A fixed constant.
    Constant(f64),
}

/// Missing-value resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub competition_distance: FillPolicy,
    pub competition_open_since_month: u32,
    pub competition_open_since_year: i32,
    pub promo2_since_week: u32,
    pub promo2_since_year: i32,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            competition_distance: FillPolicy::Median,
            competition_open_since_month: 0,
            competition_open_since_year: 0,
            promo2_since_week: 0,
            promo2_since_year: 0,
        }
    }
}

/// Outlier detection settings, consumed by the analysis reports only;
/// the pipeline itself never drops rows.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    /// IQR fence multiplier.
    pub threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self { threshold: 1.5 }
    }
}

/// Top-level preprocessing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub fill: FillConfig,
    /// Date features to export in the matrix; absent means all of them.
    pub date_features: Option<Vec<DateFeature>>,
    pub outliers: OutlierConfig,
    /// Numeric columns the scaler standardizes.
    pub scale_columns: Vec<ScaleColumn>,
    /// Materialize absent holiday distances as 0 (the compatibility
    /// default) instead of NaN.
    pub legacy_zero_holiday_distance: bool,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            fill: FillConfig::default(),
            date_features: None,
            outliers: OutlierConfig::default(),
            scale_columns: ScaleColumn::DEFAULT.to_vec(),
            legacy_zero_holiday_distance: true,
        }
    }
}

impl PrepConfig {
    /// Date features to export, falling back to the full set.
    pub fn exported_date_features(&self) -> &[DateFeature] {
        self.date_features.as_deref().unwrap_or(&DateFeature::ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: PrepConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, PrepConfig::default());
        assert_eq!(config.outliers.threshold, 1.5);
        assert!(config.legacy_zero_holiday_distance);
        assert_eq!(config.scale_columns, ScaleColumn::DEFAULT.to_vec());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let doc = "
outliers:
  threshold: 3.0
date_features: [year, month, is_weekend]
";
        let config: PrepConfig = serde_yaml::from_str(doc).unwrap();

        assert_eq!(config.outliers.threshold, 3.0);
        assert_eq!(
            config.exported_date_features(),
            &[DateFeature::Year, DateFeature::Month, DateFeature::IsWeekend]
        );
        assert_eq!(config.fill, FillConfig::default());
    }

    #[test]
    fn absent_date_features_export_everything() {
        let config = PrepConfig::default();
        assert_eq!(config.exported_date_features(), &DateFeature::ALL);
    }

    #[test]
    fn fill_policy_accepts_median_and_constant() {
        let doc = "
fill:
  competition_distance: median
  promo2_since_week: 1
";
        let config: PrepConfig = serde_yaml::from_str(doc).unwrap();
        assert_eq!(config.fill.competition_distance, FillPolicy::Median);
        assert_eq!(config.fill.promo2_since_week, 1);

        let doc = "
fill:
  competition_distance:
    constant: 5000.0
";
        let config: PrepConfig = serde_yaml::from_str(doc).unwrap();
        assert_eq!(config.fill.competition_distance, FillPolicy::Constant(5000.0));
    }
}
