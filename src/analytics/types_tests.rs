//! Unit tests for analytics types

use super::*;
use chrono::NaiveDate;

fn row(key: GroupValue, tourists: u64, stays: u64, duration: f64) -> AggregatedRow {
    AggregatedRow {
        key,
        tourist_count: tourists,
        overnight_stays: stays,
        avg_stay_duration: duration,
        record_count: 1,
        region: None,
        precoded_iso3: None,
    }
}

// ===== RegionFilter Tests =====

#[test]
fn test_region_filter_default() {
    assert_eq!(RegionFilter::default(), RegionFilter::All);
}

#[test]
fn test_region_filter_from_selection() {
    assert_eq!(RegionFilter::from_selection("All"), RegionFilter::All);
    assert_eq!(RegionFilter::from_selection("Tous"), RegionFilter::All);
    assert_eq!(RegionFilter::from_selection(""), RegionFilter::All);
    assert_eq!(
        RegionFilter::from_selection(" Asie "),
        RegionFilter::Only("Asie".to_string())
    );
    assert_eq!(
        RegionFilter::from_selection_with("Toutes", "Toutes"),
        RegionFilter::All
    );
}

#[test]
fn test_region_filter_matches() {
    let asia = RegionFilter::Only("Asie".to_string());
    assert!(asia.matches("Asie"));
    assert!(!asia.matches("Afrique"));
    assert!(RegionFilter::All.matches("Afrique"));
}

#[test]
fn test_region_filter_serialization() {
    let json = serde_json::to_string(&RegionFilter::Only("Asie".to_string())).unwrap();
    assert_eq!(json, r#"{"kind":"only","region":"Asie"}"#);
    let all: RegionFilter = serde_json::from_str(r#"{"kind":"all"}"#).unwrap();
    assert_eq!(all, RegionFilter::All);
}

// ===== GroupValue Tests =====

#[test]
fn test_group_value_label() {
    assert_eq!(GroupValue::Country("Chine".to_string()).label(), "Chine");
    assert_eq!(
        GroupValue::Month(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).label(),
        "2024-03"
    );
}

#[test]
fn test_group_value_accessors() {
    let month = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert_eq!(GroupValue::Month(month).month(), Some(month));
    assert_eq!(GroupValue::Month(month).name(), None);
    assert_eq!(GroupValue::Region("Asie".to_string()).name(), Some("Asie"));
    assert_eq!(GroupValue::Region("Asie".to_string()).key(), GroupKey::Region);
}

// ===== Metric / SortOrder Tests =====

#[test]
fn test_metric_serialization() {
    let json = serde_json::to_string(&Metric::EconomicIntensity).unwrap();
    assert_eq!(json, r#""economic_intensity""#);
    let metric: Metric = serde_json::from_str(r#""avg_stay_duration""#).unwrap();
    assert_eq!(metric, Metric::AvgStayDuration);
    assert_eq!(Metric::default(), Metric::TouristCount);
}

#[test]
fn test_sort_order_default() {
    assert_eq!(SortOrder::default(), SortOrder::Descending);
    let json = serde_json::to_string(&SortOrder::Ascending).unwrap();
    assert_eq!(json, r#""ascending""#);
}

// ===== AggregatedRow Tests =====

#[test]
fn test_aggregated_row_metrics() {
    let r = row(GroupValue::Country("A".to_string()), 100, 500, 4.5);
    assert_eq!(r.metric(Metric::TouristCount), 100.0);
    assert_eq!(r.metric(Metric::OvernightStays), 500.0);
    assert_eq!(r.metric(Metric::AvgStayDuration), 4.5);
    assert_eq!(r.metric(Metric::EconomicIntensity), 5.0);
}

#[test]
fn test_aggregated_row_serialization_includes_intensity() {
    let mut r = row(GroupValue::Country("A".to_string()), 50, 100, 2.0);
    r.region = Some("Asie".to_string());
    r.precoded_iso3 = Some("AAA".to_string());

    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["name"], "A");
    assert_eq!(json["economic_intensity"], 2.0);
    assert_eq!(json["region"], "Asie");
    assert_eq!(json["key"]["kind"], "country");
    assert!(json.get("precoded_iso3").is_none());
}

#[test]
fn test_aggregated_row_zero_tourists() {
    let r = row(GroupValue::Country("C".to_string()), 0, 0, 0.0);
    assert_eq!(r.economic_intensity(), 0.0);
    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["economic_intensity"], 0.0);
}
