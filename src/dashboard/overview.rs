//! Home page figures over the whole monthly dataset

use serde::Serialize;

use crate::analytics::aggregator::group_by_with;
use crate::analytics::calculator::{rows_of, summarize};
use crate::analytics::ranker::top_n;
use crate::analytics::{AggregatedRow, GroupKey, Metric, SortOrder, Summary};

use super::{rank_countries, CountryRow, DashboardState};

/// Countries listed on the home page
const OVERVIEW_TOP_COUNTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub summary: Summary,
    /// Regions by tourist volume, largest first
    pub tourists_by_region: Vec<AggregatedRow>,
    /// Largest individual countries by tourist volume
    pub top_countries: Vec<CountryRow>,
    /// Monthly totals in calendar order
    pub monthly: Vec<AggregatedRow>,
}

pub fn overview(state: &DashboardState) -> Overview {
    let records = state.store().regional().rows();
    let reducer = state.reducer();

    let regions = rows_of(group_by_with(records, GroupKey::Region, reducer));
    let tourists_by_region = top_n(
        &regions,
        Metric::TouristCount,
        regions.len(),
        SortOrder::Descending,
    );

    let countries = state.resolve_countries(records).resolved;
    let top_countries = rank_countries(
        &countries,
        Metric::TouristCount,
        OVERVIEW_TOP_COUNTRIES,
        SortOrder::Descending,
    );

    Overview {
        summary: summarize(records),
        tourists_by_region,
        top_countries,
        monthly: rows_of(group_by_with(records, GroupKey::Month, reducer)),
    }
}
