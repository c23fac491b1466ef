//! Economic page: stays per tourist by region and market

use serde::Serialize;

use crate::analytics::aggregator::group_by_with;
use crate::analytics::calculator::{rows_of, summarize};
use crate::analytics::filter::filter_by_region;
use crate::analytics::insights::{market_insights, MarketInsights};
use crate::analytics::ranker::top_n;
use crate::analytics::{AggregatedRow, GroupKey, Metric, RankingResult, SortOrder, Summary};
use crate::models::{HotelRecord, RecordSet, RegionRecord};

use super::international::compare_countries;
use super::{rank_countries, CountryComparison, CountryRow, DashboardState};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicView {
    /// Figures over the yearly hotel data
    pub summary: Summary,
    /// Monthly regions by intensity, highest first
    pub intensity_by_region: Vec<AggregatedRow>,
    /// Largest countries by tourist volume, for the intensity scatter
    pub scatter: Vec<CountryRow>,
    /// Monthly totals with their intensity
    pub evolution: Vec<AggregatedRow>,
    /// Names offered by the comparison picker, sorted
    pub comparison_options: Vec<String>,
}

fn hotel_in(state: &DashboardState, region: &str) -> RecordSet<HotelRecord> {
    filter_by_region(state.store().hotel(), &state.region_filter(region))
}

fn regional_in(state: &DashboardState, region: &str) -> RecordSet<RegionRecord> {
    filter_by_region(state.store().regional(), &state.region_filter(region))
}

/// Headline figures, regional intensity, scatter and evolution for a region
pub fn economic_view(state: &DashboardState, region: &str) -> EconomicView {
    let hotel = hotel_in(state, region);
    let regional = regional_in(state, region);
    let reducer = state.reducer();

    let regions = rows_of(group_by_with(regional.rows(), GroupKey::Region, reducer));
    let intensity_by_region = top_n(
        &regions,
        Metric::EconomicIntensity,
        regions.len(),
        SortOrder::Descending,
    );

    let countries = state.resolve_countries(hotel.rows()).resolved;
    let scatter = rank_countries(
        &countries,
        Metric::TouristCount,
        state.config().scatter_limit,
        SortOrder::Descending,
    );
    let mut comparison_options: Vec<String> = countries.iter().map(|c| c.entry.name()).collect();
    comparison_options.sort();

    EconomicView {
        summary: summarize(hotel.rows()),
        intensity_by_region,
        scatter,
        evolution: rows_of(group_by_with(regional.rows(), GroupKey::Month, reducer)),
        comparison_options,
    }
}

/// Countries with the highest `metric`, N clamped to the slider bounds
pub fn economic_ranking(
    state: &DashboardState,
    region: &str,
    metric: Metric,
    n: Option<usize>,
) -> RankingResult {
    let n = state.config().top_n.clamp(n);
    let hotel = hotel_in(state, region);
    let countries = state.resolve_countries(hotel.rows()).resolved;

    RankingResult {
        metric,
        order: SortOrder::Descending,
        requested: n,
        rows: rank_countries(&countries, metric, n, SortOrder::Descending)
            .into_iter()
            .map(|c| c.entry)
            .collect(),
    }
}

/// Side-by-side comparison of the selected countries within a region
pub fn economic_comparison(
    state: &DashboardState,
    region: &str,
    selected: &[String],
) -> CountryComparison {
    let hotel = hotel_in(state, region);
    compare_countries(state, hotel.rows(), selected)
}

/// High-intensity and short-stay markets within a region
pub fn economic_insights(state: &DashboardState, region: &str) -> MarketInsights {
    let hotel = hotel_in(state, region);
    let countries = state.resolve_countries(hotel.rows()).into_entries();
    market_insights(&countries, state.config().insight_count)
}
