//! International page: yearly hotel data per country of origin

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analytics::calculator::summarize;
use crate::analytics::comparison::{compare_with, normalize};
use crate::analytics::filter::{filter_by_region, filter_by_year};
use crate::analytics::{
    ComparisonResult, GroupKey, Metric, NormalizedRow, RankingResult, SortOrder,
};
use crate::models::{HotelRecord, RecordSet};

use super::{
    rank_countries, records_of_countries, CountryCoverage, CountryRow, DashboardState,
};

/// Region and year selection shared by the international widgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InternationalParams {
    /// Region selection; the sentinel or empty means every region
    #[serde(default)]
    pub region: String,
    /// Reference year; ignored when the data has no year column
    #[serde(default)]
    pub year: Option<i32>,
}

/// Country-level headline figures
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct InternationalKpis {
    pub country_count: usize,
    pub total_tourists: u64,
    pub top_country: Option<String>,
    /// Unweighted mean over the records of the resolved countries
    pub mean_stay_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InternationalView {
    pub metric: Metric,
    /// Resolved countries for the world map
    pub countries: Vec<CountryRow>,
    pub coverage: CountryCoverage,
    /// Names offered by the comparison picker, sorted
    pub comparison_options: Vec<String>,
    /// Largest countries by tourists, capped to the table size
    pub table: Vec<CountryRow>,
    pub kpis: InternationalKpis,
}

/// Aligned countries with their radar scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryComparison {
    #[serde(flatten)]
    pub comparison: ComparisonResult,
    pub radar: Vec<NormalizedRow>,
}

fn filtered_hotel(state: &DashboardState, params: &InternationalParams) -> RecordSet<HotelRecord> {
    let hotel = state.store().hotel();
    let by_region = filter_by_region(hotel, &state.region_filter(&params.region));
    filter_by_year(&by_region, params.year)
}

/// Map, table and headline figures for the selected region and year
pub fn international_view(
    state: &DashboardState,
    params: &InternationalParams,
    metric: Metric,
) -> InternationalView {
    let filtered = filtered_hotel(state, params);
    let resolution = state.resolve_countries(filtered.rows());
    let coverage = CountryCoverage::of(&resolution);
    let countries = resolution.resolved;

    let table = rank_countries(
        &countries,
        Metric::TouristCount,
        state.config().table_limit,
        SortOrder::Descending,
    );

    let mut comparison_options: Vec<String> = countries.iter().map(|c| c.entry.name()).collect();
    comparison_options.sort();

    let individual = records_of_countries(filtered.rows(), &countries);
    let kpis = if countries.is_empty() {
        InternationalKpis::default()
    } else {
        InternationalKpis {
            country_count: countries.len(),
            total_tourists: countries.iter().map(|c| c.entry.tourist_count).sum(),
            top_country: table.first().map(|c| c.entry.name()),
            mean_stay_duration: summarize(&individual).mean_stay_duration,
        }
    };

    InternationalView {
        metric,
        countries,
        coverage,
        comparison_options,
        table,
        kpis,
    }
}

/// Top or bottom N countries by `metric`
///
/// N is clamped into the configured slider bounds; `None` selects the
/// default.
pub fn international_ranking(
    state: &DashboardState,
    params: &InternationalParams,
    metric: Metric,
    n: Option<usize>,
    order: SortOrder,
) -> RankingResult {
    let n = state.config().top_n.clamp(n);
    let filtered = filtered_hotel(state, params);
    let countries = state.resolve_countries(filtered.rows()).resolved;

    RankingResult {
        metric,
        order,
        requested: n,
        rows: rank_countries(&countries, metric, n, order)
            .into_iter()
            .map(|c| c.entry)
            .collect(),
    }
}

/// Side-by-side comparison of the selected countries
///
/// Names beyond the configured cap are dropped.
pub fn international_comparison(
    state: &DashboardState,
    params: &InternationalParams,
    selected: &[String],
) -> CountryComparison {
    let filtered = filtered_hotel(state, params);
    compare_countries(state, filtered.rows(), selected)
}

/// Compares resolved countries of `records`, capping the distinct selection
pub(crate) fn compare_countries(
    state: &DashboardState,
    records: &[HotelRecord],
    selected: &[String],
) -> CountryComparison {
    let selected = capped_selection(selected, state.config().max_compared);
    let countries = state.resolve_countries(records).resolved;
    let individual = records_of_countries(records, &countries);
    let comparison = compare_with(&individual, &selected, GroupKey::Country, state.reducer());
    let radar = normalize(&comparison.rows, &Metric::RADAR);

    CountryComparison { comparison, radar }
}

/// First `cap` distinct non-blank names of `selected`
fn capped_selection(selected: &[String], cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let distinct: Vec<String> = selected
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(*s))
        .map(str::to_string)
        .collect();

    if distinct.len() > cap {
        tracing::warn!(
            requested = distinct.len(),
            kept = cap,
            "comparison selection truncated"
        );
    }
    distinct.into_iter().take(cap).collect()
}
