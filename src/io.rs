//! Input loading: daily sales CSV, store metadata CSV, YAML config.
//!
//! The loaders produce the merged `SalesTable` the pipeline consumes.
//! Empty CSV fields deserialize to `None` and stay unresolved until the
//! fill stage.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::PrepConfig;
use crate::core::{Record, SalesTable};
use crate::error::PrepError;

/// Errors from loading input files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// A daily row references a store absent from the store file.
    #[error("store {store} has no metadata in the store file")]
    UnknownStore { store: u32 },

    #[error(transparent)]
    Prep(#[from] PrepError),
}

/// One row of the daily sales file. Sales/customers/open are absent in
/// test-time files.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesRow {
    #[serde(rename = "Store")]
    pub store: u32,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Sales", default)]
    pub sales: Option<f64>,
    #[serde(rename = "Customers", default)]
    pub customers: Option<f64>,
    #[serde(rename = "Open", default)]
    pub open: Option<u8>,
    #[serde(rename = "Promo")]
    pub promo: u8,
    #[serde(rename = "StateHoliday")]
    pub state_holiday: String,
    #[serde(rename = "SchoolHoliday", default)]
    pub school_holiday: u8,
}

/// One row of the per-store metadata file.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRow {
    #[serde(rename = "Store")]
    pub store: u32,
    #[serde(rename = "StoreType")]
    pub store_type: String,
    #[serde(rename = "Assortment")]
    pub assortment: String,
    #[serde(rename = "CompetitionDistance", default)]
    pub competition_distance: Option<f64>,
    #[serde(rename = "CompetitionOpenSinceMonth", default)]
    pub competition_open_since_month: Option<u32>,
    #[serde(rename = "CompetitionOpenSinceYear", default)]
    pub competition_open_since_year: Option<i32>,
    #[serde(rename = "Promo2", default)]
    pub promo2: u8,
    #[serde(rename = "Promo2SinceWeek", default)]
    pub promo2_since_week: Option<u32>,
    #[serde(rename = "Promo2SinceYear", default)]
    pub promo2_since_year: Option<i32>,
    #[serde(rename = "PromoInterval", default)]
    pub promo_interval: Option<String>,
}

/// Read a daily sales file.
pub fn read_sales_csv(path: &Path) -> Result<Vec<SalesRow>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    info!(path = %path.display(), rows = rows.len(), "loaded sales file");
    Ok(rows)
}

/// Read a store metadata file.
pub fn read_store_csv(path: &Path) -> Result<Vec<StoreRow>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    info!(path = %path.display(), rows = rows.len(), "loaded store file");
    Ok(rows)
}

/// Join store metadata onto daily rows and validate the result.
///
/// Every daily row must resolve to a store; table validation then
/// rejects duplicate (store, date) pairs.
pub fn merge_store_metadata(
    sales: Vec<SalesRow>,
    stores: &[StoreRow],
) -> Result<SalesTable, LoadError> {
    let by_store: HashMap<u32, &StoreRow> = stores.iter().map(|s| (s.store, s)).collect();

    let mut records = Vec::with_capacity(sales.len());
    for row in sales {
        let meta = by_store
            .get(&row.store)
            .ok_or(LoadError::UnknownStore { store: row.store })?;
        records.push(Record {
            store: row.store,
            date: row.date,
            sales: row.sales,
            customers: row.customers,
            open: row.open.map(|v| v != 0),
            promo: row.promo != 0,
            school_holiday: row.school_holiday != 0,
            state_holiday: row.state_holiday,
            store_type: meta.store_type.clone(),
            assortment: meta.assortment.clone(),
            competition_distance: meta.competition_distance,
            competition_open_since_month: meta.competition_open_since_month,
            competition_open_since_year: meta.competition_open_since_year,
            promo2: meta.promo2 != 0,
            promo2_since_week: meta.promo2_since_week,
            promo2_since_year: meta.promo2_since_year,
            promo_interval: meta.promo_interval.clone(),
        });
    }

    info!(rows = records.len(), stores = stores.len(), "merged store metadata");
    Ok(SalesTable::new(records)?)
}

/// Load the preprocessing configuration from a YAML document.
///
/// A missing file is not an error: the defaults compute every documented
/// feature.
pub fn load_config(path: &Path) -> Result<PrepConfig, LoadError> {
    match std::fs::read_to_string(path) {
        Ok(doc) => Ok(serde_yaml::from_str(&doc)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "config file not found; using defaults");
            Ok(PrepConfig::default())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SALES_CSV: &str = "\
Store,Date,Sales,Customers,Open,Promo,StateHoliday,SchoolHoliday
1,2015-07-30,5263,555,1,1,0,1
1,2015-07-31,5020,546,1,0,a,0
2,2015-07-31,6064,625,1,1,0,1
";

    const STORE_CSV: &str = "\
Store,StoreType,Assortment,CompetitionDistance,CompetitionOpenSinceMonth,CompetitionOpenSinceYear,Promo2,Promo2SinceWeek,Promo2SinceYear,PromoInterval
1,c,a,1270,9,2008,0,,,
2,a,a,570,11,2007,1,13,2010,\"Jan,Apr,Jul,Oct\"
";

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn sales_rows_parse_with_blank_optionals() {
        let file = write_temp(SALES_CSV);
        let rows = read_sales_csv(file.path()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].store, 1);
        assert_eq!(rows[0].sales, Some(5263.0));
        assert_eq!(rows[1].state_holiday, "a");
        assert_eq!(
            rows[1].date,
            NaiveDate::from_ymd_opt(2015, 7, 31).unwrap()
        );
    }

    #[test]
    fn store_rows_parse_unset_promo2_fields_as_none() {
        let file = write_temp(STORE_CSV);
        let rows = read_store_csv(file.path()).unwrap();

        assert_eq!(rows[0].promo2, 0);
        assert_eq!(rows[0].promo2_since_week, None);
        assert_eq!(rows[0].promo_interval, None);
        assert_eq!(rows[1].promo2_since_week, Some(13));
        assert_eq!(rows[1].promo_interval.as_deref(), Some("Jan,Apr,Jul,Oct"));
    }

    #[test]
    fn merge_joins_metadata_by_store() {
        let sales = read_sales_csv(write_temp(SALES_CSV).path()).unwrap();
        let stores = read_store_csv(write_temp(STORE_CSV).path()).unwrap();

        let table = merge_store_metadata(sales, &stores).unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.records()[0];
        assert_eq!(first.store_type, "c");
        assert_eq!(first.competition_distance, Some(1270.0));
        assert!(!first.promo2);

        let third = &table.records()[2];
        assert_eq!(third.store, 2);
        assert!(third.promo2);
        assert_eq!(third.promo_interval.as_deref(), Some("Jan,Apr,Jul,Oct"));
    }

    #[test]
    fn merge_rejects_rows_without_store_metadata() {
        let sales = read_sales_csv(write_temp(SALES_CSV).path()).unwrap();
        let err = merge_store_metadata(sales, &[]).unwrap_err();
        assert!(matches!(err, LoadError::UnknownStore { store: 1 }));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/prep.yaml")).unwrap();
        assert_eq!(config, PrepConfig::default());
    }

    #[test]
    fn config_file_is_parsed() {
        let file = write_temp("outliers:\n  threshold: 2.5\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.outliers.threshold, 2.5);
    }
}
