//! Descriptive statistics over feature tables.
//!
//! Read-only reports for exploration: promotion distribution, sales
//! around holidays, seasonality, store behavior, and competition
//! effects. Every function takes the table by reference and returns a
//! typed report; records without an observed sales value are skipped by
//! sales aggregates.

pub mod outlier;

pub use outlier::{iqr_outliers, OutlierSummary};

use std::collections::BTreeMap;

use crate::core::{FeatureRow, FeatureTable};
use crate::features::competition;
use crate::utils::stats;

/// Mean, sample standard deviation, and count of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStats {
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

impl GroupStats {
    fn of(values: &[f64]) -> Self {
        Self {
            mean: stats::mean(values),
            std: stats::standard_deviation(values),
            count: values.len(),
        }
    }
}

/// Record counts with and without an active single-day promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromoSplit {
    pub without: usize,
    pub with: usize,
}

impl PromoSplit {
    /// Share of records with an active promotion.
    pub fn share_with(&self) -> f64 {
        let total = self.without + self.with;
        if total == 0 {
            return f64::NAN;
        }
        self.with as f64 / total as f64
    }
}

/// Promotion distribution across the training and test partitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PromoDistribution {
    pub train: PromoSplit,
    pub test: PromoSplit,
}

/// Compare promotion frequency between training and test data.
pub fn promo_distribution(train: &FeatureTable, test: &FeatureTable) -> PromoDistribution {
    PromoDistribution {
        train: split_by_promo(train),
        test: split_by_promo(test),
    }
}

fn split_by_promo(table: &FeatureTable) -> PromoSplit {
    let with = table.rows().iter().filter(|r| r.record.promo).count();
    PromoSplit {
        without: table.len() - with,
        with,
    }
}

/// Sales behavior around holidays.
#[derive(Debug, Clone, PartialEq)]
pub struct HolidaySalesReport {
    /// Sales stats grouped by state-holiday token.
    pub by_holiday_type: BTreeMap<String, GroupStats>,
    /// Mean sales on days whose next same-store day is a holiday.
    pub before_holiday_avg: f64,
    /// Mean sales on days whose previous same-store day is a holiday.
    pub after_holiday_avg: f64,
}

/// Analyze sales around holidays.
pub fn holiday_sales(table: &FeatureTable) -> HolidaySalesReport {
    let mut by_token: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in table.rows() {
        if let Some(sales) = row.record.sales {
            by_token
                .entry(row.record.state_holiday.clone())
                .or_default()
                .push(sales);
        }
    }

    let mut before = Vec::new();
    let mut after = Vec::new();
    for indices in store_partitions(table).values() {
        for pair in indices.windows(2) {
            let (earlier, later) = (&table.rows()[pair[0]], &table.rows()[pair[1]]);
            if later.holiday.is_holiday {
                if let Some(sales) = earlier.record.sales {
                    before.push(sales);
                }
            }
            if earlier.holiday.is_holiday {
                if let Some(sales) = later.record.sales {
                    after.push(sales);
                }
            }
        }
    }

    HolidaySalesReport {
        by_holiday_type: by_token
            .into_iter()
            .map(|(token, values)| (token, GroupStats::of(&values)))
            .collect(),
        before_holiday_avg: stats::mean(&before),
        after_holiday_avg: stats::mean(&after),
    }
}

/// Seasonal sales patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalReport {
    pub monthly: BTreeMap<u32, GroupStats>,
    pub weekday: BTreeMap<u32, GroupStats>,
    /// December vs the rest of the year.
    pub december_avg: f64,
    pub other_months_avg: f64,
}

/// Analyze monthly and weekday sales patterns.
pub fn seasonal_patterns(table: &FeatureTable) -> SeasonalReport {
    let mut monthly: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    let mut weekday: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    let mut december = Vec::new();
    let mut rest = Vec::new();

    for row in table.rows() {
        let Some(sales) = row.record.sales else {
            continue;
        };
        monthly.entry(row.calendar.month).or_default().push(sales);
        weekday.entry(row.calendar.weekday).or_default().push(sales);
        if row.calendar.month == 12 {
            december.push(sales);
        } else {
            rest.push(sales);
        }
    }

    SeasonalReport {
        monthly: into_group_stats(monthly),
        weekday: into_group_stats(weekday),
        december_avg: stats::mean(&december),
        other_months_avg: stats::mean(&rest),
    }
}

/// Store-level sales patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct StorePatternsReport {
    /// Stores open on every one of their records.
    pub always_open_stores: Vec<u32>,
    pub by_store_type: BTreeMap<String, GroupStats>,
    pub by_assortment: BTreeMap<String, GroupStats>,
}

/// Analyze per-store behavior and sales by store metadata.
pub fn store_patterns(table: &FeatureTable) -> StorePatternsReport {
    let always_open_stores = store_partitions(table)
        .iter()
        .filter(|(_, indices)| {
            indices
                .iter()
                .all(|&i| table.rows()[i].record.open == Some(true))
        })
        .map(|(&store, _)| store)
        .collect();

    let mut by_store_type: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut by_assortment: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in table.rows() {
        let Some(sales) = row.record.sales else {
            continue;
        };
        by_store_type
            .entry(row.record.store_type.clone())
            .or_default()
            .push(sales);
        by_assortment
            .entry(row.record.assortment.clone())
            .or_default()
            .push(sales);
    }

    StorePatternsReport {
        always_open_stores,
        by_store_type: into_group_stats(by_store_type),
        by_assortment: into_group_stats(by_assortment),
    }
}

/// Competition effects on sales.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionImpactReport {
    /// Sales stats per equal-frequency distance band, nearest first.
    pub by_distance_band: Vec<GroupStats>,
    /// Mean sales while competition is at most three months old.
    pub new_competition_avg: f64,
    pub established_competition_avg: f64,
}

/// Number of equal-frequency distance bands in the impact report.
const DISTANCE_BANDS: usize = 5;

/// Analyze the effect of competitor distance and age on sales.
///
/// Works from the raw record fields, so the report is identical whether
/// it runs before or after scaling.
pub fn competition_impact(table: &FeatureTable) -> CompetitionImpactReport {
    let observed: Vec<(&FeatureRow, f64)> = table
        .rows()
        .iter()
        .filter_map(|row| row.record.sales.map(|sales| (row, sales)))
        .collect();

    let distances: Vec<f64> = observed
        .iter()
        .filter_map(|(row, _)| row.record.competition_distance)
        .collect();
    let edges: Vec<f64> = (1..DISTANCE_BANDS)
        .map(|i| stats::quantile(&distances, i as f64 / DISTANCE_BANDS as f64))
        .collect();

    let mut bands: Vec<Vec<f64>> = vec![Vec::new(); DISTANCE_BANDS];
    let mut new_competition = Vec::new();
    let mut established = Vec::new();

    for (row, sales) in &observed {
        if let Some(distance) = row.record.competition_distance {
            let band = edges.partition_point(|&e| e < distance);
            bands[band].push(*sales);
        }

        if let (Some(year), Some(month)) = (
            row.record.competition_open_since_year,
            row.record.competition_open_since_month,
        ) {
            let age = competition::months_open(&row.calendar, year, month);
            if age <= 3.0 {
                new_competition.push(*sales);
            } else {
                established.push(*sales);
            }
        }
    }

    CompetitionImpactReport {
        by_distance_band: bands.iter().map(|b| GroupStats::of(b)).collect(),
        new_competition_avg: stats::mean(&new_competition),
        established_competition_avg: stats::mean(&established),
    }
}

/// Promotion effectiveness; index 0 = no promotion, 1 = promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoEffectivenessReport {
    pub sales_by_promo: [GroupStats; 2],
    pub customers_by_promo: [GroupStats; 2],
    pub sales_per_customer_by_promo: [GroupStats; 2],
    /// Mean sales per store type, without and with promotion.
    pub sales_by_store_type_promo: BTreeMap<String, [f64; 2]>,
}

/// Analyze how single-day promotions move sales and traffic.
pub fn promo_effectiveness(table: &FeatureTable) -> PromoEffectivenessReport {
    let mut sales = [Vec::new(), Vec::new()];
    let mut customers = [Vec::new(), Vec::new()];
    let mut per_customer = [Vec::new(), Vec::new()];
    let mut by_store_type: BTreeMap<String, [Vec<f64>; 2]> = BTreeMap::new();

    for row in table.rows() {
        let flag = row.record.promo as usize;
        if let Some(s) = row.record.sales {
            sales[flag].push(s);
            by_store_type
                .entry(row.record.store_type.clone())
                .or_default()[flag]
                .push(s);
            if let Some(c) = row.record.customers {
                if c > 0.0 {
                    per_customer[flag].push(s / c);
                }
            }
        }
        if let Some(c) = row.record.customers {
            customers[flag].push(c);
        }
    }

    PromoEffectivenessReport {
        sales_by_promo: [GroupStats::of(&sales[0]), GroupStats::of(&sales[1])],
        customers_by_promo: [GroupStats::of(&customers[0]), GroupStats::of(&customers[1])],
        sales_per_customer_by_promo: [
            GroupStats::of(&per_customer[0]),
            GroupStats::of(&per_customer[1]),
        ],
        sales_by_store_type_promo: by_store_type
            .into_iter()
            .map(|(k, [off, on])| (k, [stats::mean(&off), stats::mean(&on)]))
            .collect(),
    }
}

/// Indices per store, sorted by date within each store.
fn store_partitions(table: &FeatureTable) -> BTreeMap<u32, Vec<usize>> {
    let mut partitions: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (i, row) in table.rows().iter().enumerate() {
        partitions.entry(row.record.store).or_default().push(i);
    }
    for indices in partitions.values_mut() {
        indices.sort_by_key(|&i| table.rows()[i].record.date);
    }
    partitions
}

fn into_group_stats<K: Ord>(groups: BTreeMap<K, Vec<f64>>) -> BTreeMap<K, GroupStats> {
    groups
        .into_iter()
        .map(|(k, values)| (k, GroupStats::of(&values)))
        .collect()
}
