//! Categorical encoding.
//!
//! Fixed, closed vocabularies mapped to small integer codes. A value
//! outside its vocabulary is corrupt input and fails the run loudly
//! rather than leaking a silent missing value into the feature matrix.

use crate::core::Record;
use crate::error::{PrepError, Result};

/// Integer codes for the three categorical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedCategoricals {
    /// a:0, b:1, c:2, d:3
    pub store_type: u8,
    /// a:0, b:1, c:2
    pub assortment: u8,
    /// "0":0, a:1, b:2, c:3
    pub state_holiday: u8,
}

/// Code for a store-type token.
pub fn store_type_code(value: &str) -> Result<u8> {
    match value {
        "a" => Ok(0),
        "b" => Ok(1),
        "c" => Ok(2),
        "d" => Ok(3),
        _ => Err(PrepError::UnknownCategory {
            column: "store_type",
            value: value.to_string(),
        }),
    }
}

/// Code for an assortment token.
pub fn assortment_code(value: &str) -> Result<u8> {
    match value {
        "a" => Ok(0),
        "b" => Ok(1),
        "c" => Ok(2),
        _ => Err(PrepError::UnknownCategory {
            column: "assortment",
            value: value.to_string(),
        }),
    }
}

/// Code for a state-holiday token.
pub fn state_holiday_code(value: &str) -> Result<u8> {
    match value {
        "0" => Ok(0),
        "a" => Ok(1),
        "b" => Ok(2),
        "c" => Ok(3),
        _ => Err(PrepError::UnknownCategory {
            column: "state_holiday",
            value: value.to_string(),
        }),
    }
}

/// Encode all categorical columns of one record.
pub fn encode(record: &Record) -> Result<EncodedCategoricals> {
    Ok(EncodedCategoricals {
        store_type: store_type_code(&record.store_type)?,
        assortment: assortment_code(&record.assortment)?,
        state_holiday: state_holiday_code(&record.state_holiday)?,
    })
}
