//! Unit tests for analytics calculator
//!
//! Covers the intensity convention and the headline figures of a subset.

use super::calculator::*;
use super::*;
use crate::models::{HotelRecord, RegionRecord};
use chrono::NaiveDate;

// ===== Helper Functions =====

fn country_row(name: &str, tourists: u64, stays: u64) -> AggregatedRow {
    AggregatedRow {
        key: GroupValue::Country(name.to_string()),
        tourist_count: tourists,
        overnight_stays: stays,
        avg_stay_duration: 0.0,
        record_count: 1,
        region: None,
        precoded_iso3: None,
    }
}

fn march() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

// ===== intensity Tests =====

#[test]
fn test_intensity_scenario() {
    let rows = [
        country_row("A", 100, 500),
        country_row("B", 50, 100),
        country_row("C", 0, 0),
    ];
    let values: Vec<f64> = rows.iter().map(|r| r.economic_intensity()).collect();
    assert_eq!(values, vec![5.0, 2.0, 0.0]);

    let top = super::ranker::top_n(&rows, Metric::TouristCount, 2, SortOrder::Descending);
    let names: Vec<String> = top.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_intensity_zero_tourists_with_stays() {
    assert_eq!(intensity(42, 0), 0.0);
}

#[test]
fn test_metric_value_reads_every_field() {
    let mut row = country_row("A", 10, 35);
    row.avg_stay_duration = 3.2;
    assert_eq!(metric_value(&row, Metric::TouristCount), 10.0);
    assert_eq!(metric_value(&row, Metric::OvernightStays), 35.0);
    assert_eq!(metric_value(&row, Metric::AvgStayDuration), 3.2);
    assert_eq!(metric_value(&row, Metric::EconomicIntensity), 3.5);
}

// ===== summarize Tests =====

#[test]
fn test_summarize_empty() {
    let records: Vec<RegionRecord> = Vec::new();
    assert_eq!(summarize(&records), Summary::default());
}

#[test]
fn test_summarize_totals() {
    let records = vec![
        RegionRecord::new(march(), "Chine", "Asie", 100, 400, 4.0),
        RegionRecord::new(march(), "Japon", "Asie", 50, 300, 6.0),
        RegionRecord::new(march(), "Chine", "Asie", 30, 100, 2.0),
    ];
    let summary = summarize(&records);

    assert_eq!(summary.total_tourists, 180);
    assert_eq!(summary.total_overnight_stays, 800);
    assert_eq!(summary.mean_stay_duration, 4.0);
    assert!((summary.economic_intensity - 800.0 / 180.0).abs() < 1e-12);
    assert_eq!(summary.record_count, 3);
    assert_eq!(summary.top_country.as_deref(), Some("Chine"));
}

#[test]
fn test_summarize_top_country_tie_is_alphabetical() {
    let records = vec![
        HotelRecord::new(Some(2023), "Suisse", "Europe", 10, 20, 2.0),
        HotelRecord::new(Some(2023), "Belgique", "Europe", 10, 30, 3.0),
    ];
    assert_eq!(summarize(&records).top_country.as_deref(), Some("Belgique"));
}

#[test]
fn test_summarize_no_tourists() {
    let records = vec![HotelRecord::new(None, "Chine", "Asie", 0, 0, 0.0)];
    let summary = summarize(&records);
    assert_eq!(summary.economic_intensity, 0.0);
    assert_eq!(summary.record_count, 1);
}

#[test]
fn test_rows_of_key_order() {
    let records = vec![
        HotelRecord::new(None, "Japon", "Asie", 1, 1, 1.0),
        HotelRecord::new(None, "Chine", "Asie", 1, 1, 1.0),
    ];
    let rows = rows_of(super::aggregator::group_by(&records, GroupKey::Country));
    let names: Vec<String> = rows.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Chine", "Japon"]);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn intensity_is_ratio_or_zero(stays in 0u64..10_000_000, tourists in 0u64..10_000_000) {
            let value = intensity(stays, tourists);
            prop_assert!(value.is_finite());
            if tourists > 0 {
                prop_assert_eq!(value, stays as f64 / tourists as f64);
            } else {
                prop_assert_eq!(value, 0.0);
            }
        }
    }
}
