//! Unit tests for country code resolution

use super::*;
use crate::models::{HotelRecord, RegionRecord};
use chrono::NaiveDate;
use proptest::prelude::*;

// ===== Helper Functions =====

fn hotel(country: &str) -> HotelRecord {
    HotelRecord::new(Some(2023), country, "Asie", 10, 40, 4.0)
}

fn regional(country: &str) -> RegionRecord {
    RegionRecord::new(
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        country,
        "Europe",
        10,
        40,
        4.0,
    )
}

// ===== resolve Tests =====

#[test]
fn test_resolve_from_table() {
    let resolver = CountryCodeResolver::builtin();
    assert_eq!(resolver.resolve("Japon", None), Some("JPN"));
    assert_eq!(resolver.resolve("  Japon ", None), Some("JPN"));
    assert_eq!(resolver.resolve("Atlantide", None), None);
}

#[test]
fn test_resolve_prefers_precoded() {
    let resolver = CountryCodeResolver::builtin();
    assert_eq!(resolver.resolve("Japon", Some("XJP")), Some("XJP"));
    assert_eq!(resolver.resolve("Atlantide", Some("ATL")), Some("ATL"));
}

#[test]
fn test_resolve_ignores_blank_precoded() {
    let resolver = CountryCodeResolver::builtin();
    assert_eq!(resolver.resolve("Japon", Some("")), Some("JPN"));
    assert_eq!(resolver.resolve("Japon", Some("   ")), Some("JPN"));
    assert_eq!(resolver.resolve("Atlantide", Some(" ")), None);
}

// ===== is_aggregate Tests =====

#[test]
fn test_is_aggregate() {
    let resolver = CountryCodeResolver::builtin();
    assert!(resolver.is_aggregate("Autre Asie"));
    assert!(resolver.is_aggregate("Europe (hors France)"));
    assert!(resolver.is_aggregate("Other Asia"));
    assert!(!resolver.is_aggregate("Chine"));
}

// ===== filter_to_individual_countries Tests =====

#[test]
fn test_filter_excludes_aggregates_and_unknowns() {
    let resolver = CountryCodeResolver::builtin();
    let records = vec![
        hotel("Chine"),
        hotel("Autre Asie"),
        hotel("Atlantide"),
        hotel("Inde"),
    ];

    let result = resolver.filter_to_individual_countries(&records);

    assert_eq!(result.total(), 4);
    assert_eq!(result.shown(), 2);
    assert_eq!(result.excluded_count(), 2);
    assert_eq!(result.resolved[0].iso3, "CHN");
    assert_eq!(result.resolved[1].iso3, "IND");
    assert_eq!(
        result.excluded,
        vec![
            ExcludedCountry {
                name: "Autre Asie".to_string(),
                reason: ExclusionReason::AggregateName,
            },
            ExcludedCountry {
                name: "Atlantide".to_string(),
                reason: ExclusionReason::UnknownCountry,
            },
        ]
    );
}

#[test]
fn test_precoded_aggregate_is_still_excluded() {
    let resolver = CountryCodeResolver::builtin();
    let records = vec![hotel("Autre Asie").with_iso3("ASI")];
    let result = resolver.filter_to_individual_countries(&records);
    assert_eq!(result.shown(), 0);
    assert_eq!(result.excluded[0].reason, ExclusionReason::AggregateName);
}

#[test]
fn test_precoded_unknown_country_resolves() {
    let resolver = CountryCodeResolver::builtin();
    let records = vec![hotel("Brunei").with_iso3("BRN")];
    let result = resolver.filter_to_individual_countries(&records);
    assert_eq!(result.shown(), 1);
    assert_eq!(result.resolved[0].iso3, "BRN");
}

#[test]
fn test_both_collections_use_same_table() {
    let resolver = CountryCodeResolver::builtin();
    let from_regional = resolver.filter_to_individual_countries(&[regional("Allemagne")]);
    let from_hotel = resolver.filter_to_individual_countries(&[hotel("Allemagne")]);
    assert_eq!(from_regional.resolved[0].iso3, from_hotel.resolved[0].iso3);
}

#[test]
fn test_ninety_countries_ten_aggregates() {
    let resolver = CountryCodeResolver::builtin();
    let countries: Vec<&str> = BUILTIN_ISO3_CODES.keys().copied().take(80).collect();
    assert_eq!(countries.len(), 80);

    let mut records: Vec<HotelRecord> = countries.iter().map(|c| hotel(c)).collect();
    // Ten more countries that only resolve through their own code
    for i in 0..10 {
        records.push(hotel(&format!("Territoire {}", i)).with_iso3(format!("T{:02}", i)));
    }
    let aggregates: Vec<&str> = BUILTIN_AGGREGATE_NAMES.iter().copied().take(10).collect();
    records.extend(aggregates.iter().map(|a| hotel(a)));

    let result = resolver.filter_to_individual_countries(&records);

    assert_eq!(result.total(), 100);
    assert_eq!(result.shown(), 90);
    assert_eq!(result.excluded_count(), 10);
    assert!(result
        .excluded
        .iter()
        .all(|e| e.reason == ExclusionReason::AggregateName));
}

#[test]
fn test_empty_input() {
    let resolver = CountryCodeResolver::builtin();
    let result = resolver.filter_to_individual_countries::<HotelRecord>(&[]);
    assert_eq!(result.total(), 0);
    assert!(result.resolved.is_empty());
}

// ===== with_reference Tests =====

#[test]
fn test_with_reference_extends_tables() {
    let mut extra = ReferenceData::default();
    extra.codes.insert("Brunei".to_string(), "BRN".to_string());
    extra.aggregates.push("Autres Europe".to_string());

    let resolver = CountryCodeResolver::with_reference(&extra).unwrap();
    assert_eq!(resolver.resolve("Brunei", None), Some("BRN"));
    assert!(resolver.is_aggregate("Autres Europe"));
    assert_eq!(resolver.code_count(), BUILTIN_ISO3_CODES.len() + 1);
    assert_eq!(resolver.aggregate_count(), BUILTIN_AGGREGATE_NAMES.len() + 1);
}

#[test]
fn test_with_reference_rejects_bad_code() {
    let mut extra = ReferenceData::default();
    extra.codes.insert("Brunei".to_string(), "Brunei".to_string());
    assert!(CountryCodeResolver::with_reference(&extra).is_err());
}

#[test]
fn test_resolution_serialization_flattens_entry() {
    let resolver = CountryCodeResolver::builtin();
    let result = resolver.filter_to_individual_countries(&[hotel("Chine")]);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["resolved"][0]["iso3"], "CHN");
    assert_eq!(json["resolved"][0]["country"], "Chine");
}

// ===== Property Tests =====

fn any_name() -> impl Strategy<Value = String> {
    let known: Vec<String> = BUILTIN_ISO3_CODES.keys().map(|s| s.to_string()).collect();
    let aggregates: Vec<String> = BUILTIN_AGGREGATE_NAMES.iter().map(|s| s.to_string()).collect();
    prop_oneof![
        proptest::sample::select(known),
        proptest::sample::select(aggregates),
        "[A-Z][a-z]{3,10}",
    ]
}

proptest! {
    /// Invariant: resolved output never contains an aggregate label
    #[test]
    fn prop_resolved_never_contains_aggregates(
        names in proptest::collection::vec(any_name(), 0..60),
        precode in any::<bool>(),
    ) {
        let resolver = CountryCodeResolver::builtin();
        let records: Vec<HotelRecord> = names
            .iter()
            .map(|n| if precode { hotel(n).with_iso3("ZZZ") } else { hotel(n) })
            .collect();

        let result = resolver.filter_to_individual_countries(&records);

        prop_assert_eq!(result.total(), records.len());
        for entry in &result.resolved {
            prop_assert!(!resolver.is_aggregate(&entry.entry.country));
            prop_assert!(!entry.iso3.is_empty());
        }
    }
}
