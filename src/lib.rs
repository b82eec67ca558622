//! # retail-features
//!
//! Feature engineering pipeline for per-store retail sales forecasting.
//!
//! Turns raw (store, date) records — promotion flags, state holidays,
//! competition attributes — into a model-ready feature table: calendar
//! features, per-store holiday distances, competition and
//! recurring-promotion features, strict categorical codes, and
//! train-fitted standardization. The `analysis` module computes
//! descriptive statistics over the result.
//!
//! # Example
//!
//! ```
//! use retail_features::prelude::*;
//! use chrono::NaiveDate;
//!
//! let records: Vec<Record> = (1..=8)
//!     .map(|day| {
//!         let mut r = Record::new(1, NaiveDate::from_ymd_opt(2023, 1, day).unwrap());
//!         r.sales = Some(5000.0);
//!         r.competition_distance = Some(day as f64 * 100.0);
//!         r
//!     })
//!     .collect();
//!
//! let train = SalesTable::new(records)?;
//! let result = Preprocessor::new(PrepConfig::default()).preprocess(train, None)?;
//! assert_eq!(result.train.len(), 8);
//! # Ok::<(), PrepError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod fill;
pub mod io;
pub mod pipeline;
pub mod transform;
pub mod utils;

pub use error::{PrepError, Result};

pub mod prelude {
    pub use crate::config::PrepConfig;
    pub use crate::core::{FeatureRow, FeatureTable, Record, SalesTable};
    pub use crate::error::{PrepError, Result};
    pub use crate::pipeline::{Preprocessed, Preprocessor};
    pub use crate::transform::{ScaleColumn, ScalerParams};
}
