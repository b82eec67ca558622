//! IQR outlier detection.
//!
//! Consumed by reporting only; the pipeline never drops rows.

use tracing::info;

use crate::utils::stats;

/// Result of an IQR outlier scan.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierSummary {
    /// Indices of values outside the fences.
    pub indices: Vec<usize>,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// IQR multiplier the fences were built with.
    pub threshold: f64,
}

impl OutlierSummary {
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_outlier(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }
}

/// Flag values outside `[Q1 - t*IQR, Q3 + t*IQR]`.
pub fn iqr_outliers(values: &[f64], threshold: f64) -> OutlierSummary {
    if values.is_empty() {
        return OutlierSummary {
            indices: Vec::new(),
            lower_fence: f64::NAN,
            upper_fence: f64::NAN,
            threshold,
        };
    }

    let q1 = stats::quantile(values, 0.25);
    let q3 = stats::quantile(values, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - threshold * iqr;
    let upper_fence = q3 + threshold * iqr;

    let indices: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v < lower_fence || v > upper_fence)
        .map(|(i, _)| i)
        .collect();

    info!(count = indices.len(), total = values.len(), "outlier scan complete");

    OutlierSummary {
        indices,
        lower_fence,
        upper_fence,
        threshold,
    }
}
