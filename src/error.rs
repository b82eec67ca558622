//! Error types for the retail-features library.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for feature-preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;

/// Errors that can occur while preparing the feature table.
///
/// Recoverable data-quality conditions (an unparseable promo-interval
/// token) are logged and skipped rather than surfaced here; everything in
/// this enum aborts the run with no partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrepError {
    /// Input table is empty where at least one record is required.
    #[error("empty input data")]
    EmptyData,

    /// A required column still has unresolved values at stage entry.
    #[error("required column {column} has unresolved values")]
    MissingColumn { column: &'static str },

    /// A categorical value outside its fixed vocabulary.
    #[error("unknown {column} value: {value:?}")]
    UnknownCategory { column: &'static str, value: String },

    /// Two records share the same (store, date) pair.
    #[error("duplicate record for store {store} on {date}")]
    DuplicateRecord { store: u32, date: NaiveDate },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = PrepError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = PrepError::MissingColumn {
            column: "competition_distance",
        };
        assert_eq!(
            err.to_string(),
            "required column competition_distance has unresolved values"
        );

        let err = PrepError::UnknownCategory {
            column: "store_type",
            value: "e".to_string(),
        };
        assert_eq!(err.to_string(), "unknown store_type value: \"e\"");

        let err = PrepError::DuplicateRecord {
            store: 7,
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        };
        assert_eq!(err.to_string(), "duplicate record for store 7 on 2023-01-01");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = PrepError::EmptyData;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
