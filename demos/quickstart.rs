//! Feature pipeline quickstart.
//!
//! Run with: cargo run --example quickstart

use chrono::NaiveDate;
use retail_features::analysis;
use retail_features::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn synthetic_records(with_sales: bool, month: u32) -> Vec<Record> {
    let mut records = Vec::new();
    for store in 1u32..=2 {
        for day in 1u32..=14 {
            let mut r = Record::new(store, date(2023, month, day));
            if with_sales {
                r.sales = Some(3000.0 + 500.0 * store as f64 + 40.0 * day as f64);
                r.customers = Some(300.0 + 10.0 * day as f64);
            }
            r.open = Some(true);
            r.promo = day % 4 == 0;
            if store == 1 && day == 6 {
                r.state_holiday = "a".to_string();
            }
            r.store_type = if store == 1 { "c" } else { "a" }.to_string();
            r.competition_distance = if store == 1 { Some(320.0) } else { None };
            r.competition_open_since_month = Some(3);
            r.competition_open_since_year = Some(2021);
            r.promo2 = store == 2;
            if store == 2 {
                r.promo2_since_week = Some(14);
                r.promo2_since_year = Some(2022);
                r.promo_interval = Some("Jan,Apr,Jul,Oct".to_string());
            }
            records.push(r);
        }
    }
    records
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Retail Feature Pipeline Quickstart ===\n");

    let config = PrepConfig::default();
    let train = SalesTable::new(synthetic_records(true, 1))?;
    let test = SalesTable::new(synthetic_records(false, 4))?;
    println!("Train rows: {}, test rows: {}\n", train.len(), test.len());

    let result = Preprocessor::new(config.clone()).preprocess(train, Some(test))?;

    // 1. Fitted parameters (training data only)
    println!("--- Fitted Parameters ---");
    println!("Distance bin edges:   {:?}", result.bins.edges());
    println!("Distance fill value:  {}", result.bins.fill_value());
    println!(
        "Scaler (distance):    center {:.2}, scale {:.2}",
        result.scaler.center(ScaleColumn::CompetitionDistance)?,
        result.scaler.scale(ScaleColumn::CompetitionDistance)?
    );

    // 2. A derived row
    let row = &result.train.rows()[5];
    println!("\n--- Store 1, {} ---", row.record.date);
    println!("Weekday / weekend:    {} / {}", row.calendar.weekday, row.calendar.is_weekend);
    println!("Is holiday:           {}", row.holiday.is_holiday);
    println!(
        "Days to/after:        {} / {}",
        row.holiday.days_to_holiday_or_zero(),
        row.holiday.days_after_holiday_or_zero()
    );
    println!("Competition tenure:   {}", row.competition.tenure);
    println!("Promo month:          {}", row.promotion.is_promo_month);

    // 3. Exported matrix
    let schema = result.train.schema(&config);
    let matrix = result.train.matrix(&config);
    println!("\n--- Matrix ---");
    println!("{} columns x {} rows", schema.len(), matrix.len());
    println!("First columns: {:?}", &schema[..6.min(schema.len())]);

    // 4. Analysis reports
    let test_table = result.test.as_ref().expect("test table requested");
    let promos = analysis::promo_distribution(&result.train, test_table);
    println!("\n--- Analysis ---");
    println!(
        "Promo share:          train {:.2}, test {:.2}",
        promos.train.share_with(),
        promos.test.share_with()
    );

    let holidays = analysis::holiday_sales(&result.train);
    println!(
        "Sales before/after:   {:.0} / {:.0}",
        holidays.before_holiday_avg, holidays.after_holiday_avg
    );

    let patterns = analysis::store_patterns(&result.train);
    println!("Always-open stores:   {:?}", patterns.always_open_stores);

    let sales: Vec<f64> = result
        .train
        .rows()
        .iter()
        .filter_map(|r| r.record.sales)
        .collect();
    let outliers = analysis::iqr_outliers(&sales, config.outliers.threshold);
    println!("Sales outliers:       {}", outliers.count());

    Ok(())
}
