//! Missing-value resolution.
//!
//! Resolves unset competition and promo2 fields per the configured fill
//! policy, so every arithmetic feature downstream sees concrete values.

use tracing::{info, warn};

use crate::config::{FillConfig, FillPolicy};
use crate::core::Record;
use crate::utils::stats;

/// Counts of values resolved by one fill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    pub competition_distance: usize,
    pub competition_open_since: usize,
    pub promo2_since: usize,
    pub promo_interval: usize,
}

/// Resolve unset fields in place.
///
/// `competition_distance` follows the configured policy. A median policy
/// over a table with no observed distances has nothing to impute from;
/// the column stays unresolved and the competition stage reports it as a
/// missing column.
pub fn resolve_missing(records: &mut [Record], config: &FillConfig) -> FillReport {
    let mut report = FillReport::default();

    let distance_fill = match config.competition_distance {
        FillPolicy::Constant(value) => Some(value),
        FillPolicy::Median => {
            let present: Vec<f64> = records
                .iter()
                .filter_map(|r| r.competition_distance)
                .collect();
            if present.is_empty() {
                warn!("no observed competition distances; median fill skipped");
                None
            } else {
                Some(stats::median(&present))
            }
        }
    };

    for record in records.iter_mut() {
        if record.competition_distance.is_none() {
            if let Some(value) = distance_fill {
                record.competition_distance = Some(value);
                report.competition_distance += 1;
            }
        }
        if record.competition_open_since_month.is_none() {
            record.competition_open_since_month = Some(config.competition_open_since_month);
            report.competition_open_since += 1;
        }
        if record.competition_open_since_year.is_none() {
            record.competition_open_since_year = Some(config.competition_open_since_year);
            report.competition_open_since += 1;
        }
        if record.promo2_since_week.is_none() {
            record.promo2_since_week = Some(config.promo2_since_week);
            report.promo2_since += 1;
        }
        if record.promo2_since_year.is_none() {
            record.promo2_since_year = Some(config.promo2_since_year);
            report.promo2_since += 1;
        }
        if record.promo_interval.is_none() {
            record.promo_interval = Some(String::new());
            report.promo_interval += 1;
        }
    }

    info!(
        distances = report.competition_distance,
        competition_open_since = report.competition_open_since,
        promo2_since = report.promo2_since,
        promo_intervals = report.promo_interval,
        "resolved missing values"
    );

    report
}
