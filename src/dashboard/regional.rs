//! Regional page: monthly data over a date range

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::aggregator::{group_by_nested, group_by_with};
use crate::analytics::calculator::{rows_of, summarize};
use crate::analytics::distribution::{bucketize, Bucket};
use crate::analytics::filter::{filter_by_date_range, filter_by_month_range, MonthRange};
use crate::analytics::ranker::top_n;
use crate::analytics::{AggregatedRow, GroupKey, GroupValue, Metric, SortOrder, Summary};
use crate::error::Result;
use crate::geo::{region_centroid, GeoPoint};
use crate::models::{first_of_month, Record, RecordSet};

use super::{CountryCoverage, CountryRow, DashboardState};

/// Regional page parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionalParams {
    /// First month shown; the earliest month when absent
    pub start: Option<NaiveDate>,
    /// Last month shown; the latest month when absent
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub metric: Metric,
}

/// Region aggregate with its map anchor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRow {
    #[serde(flatten)]
    pub row: AggregatedRow,
    pub centroid: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalView {
    pub metric: Metric,
    /// Resolved countries for the choropleth
    pub countries: Vec<CountryRow>,
    pub coverage: CountryCoverage,
    /// Every region in name order, for the bubble map
    pub regions: Vec<RegionRow>,
    /// Largest regions by the selected metric
    pub top_regions: Vec<AggregatedRow>,
    /// Mean stays of the largest regions by tourist volume
    pub stay_by_region: Vec<AggregatedRow>,
    /// Countries per mean stay bucket
    pub duration_distribution: Vec<Bucket>,
    /// Countries per tourist volume bucket
    pub volume_distribution: Vec<Bucket>,
    pub summary: Summary,
}

/// Tourist volume of one region in one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionPoint {
    pub month: NaiveDate,
    pub region: String,
    pub tourist_count: u64,
}

/// Regional page over the months between `params.start` and `params.end`
///
/// # Returns
/// `InvalidRange` when both bounds are given and the start month lies after
/// the end month. An open bound that falls past the data yields an empty
/// view.
pub fn regional_view(state: &DashboardState, params: &RegionalParams) -> Result<RegionalView> {
    let regional = state.store().regional();
    let filtered = match (params.start, params.end) {
        (Some(start), Some(end)) => filter_by_date_range(regional, start, end)?,
        _ => within_open_bounds(regional, params),
    };
    let records = filtered.rows();
    let reducer = state.reducer();
    let config = state.config();

    let resolution = state.resolve_countries(records);
    let coverage = CountryCoverage::of(&resolution);

    let region_rows = rows_of(group_by_with(records, GroupKey::Region, reducer));
    let top_regions = top_n(
        &region_rows,
        params.metric,
        config.top_regions,
        SortOrder::Descending,
    );
    let mut stay_by_region = top_n(
        &region_rows,
        Metric::TouristCount,
        config.top_regions,
        SortOrder::Descending,
    );
    stay_by_region.sort_by(|a, b| b.avg_stay_duration.total_cmp(&a.avg_stay_duration));

    let durations: Vec<f64> = resolution
        .resolved
        .iter()
        .map(|c| c.entry.avg_stay_duration)
        .collect();
    let volumes: Vec<f64> = resolution
        .resolved
        .iter()
        .map(|c| c.entry.tourist_count as f64)
        .collect();

    let regions = region_rows
        .into_iter()
        .map(|row| RegionRow {
            centroid: row.key.name().and_then(region_centroid),
            row,
        })
        .collect();

    Ok(RegionalView {
        metric: params.metric,
        countries: resolution.resolved,
        coverage,
        regions,
        top_regions,
        stay_by_region,
        duration_distribution: bucketize(&durations, &config.duration_bins),
        volume_distribution: bucketize(&volumes, &config.volume_bins),
        summary: summarize(records),
    })
}

/// Monthly tourist volume of each selected region
///
/// An empty selection yields an empty series.
pub fn regional_evolution(state: &DashboardState, regions: &[String]) -> Vec<EvolutionPoint> {
    if regions.is_empty() {
        return Vec::new();
    }
    let records: Vec<_> = state
        .store()
        .regional()
        .rows()
        .iter()
        .filter(|r| regions.iter().any(|wanted| wanted.trim() == r.region))
        .collect();

    let nested = group_by_nested(
        &records,
        GroupKey::Month,
        GroupKey::Region,
        state.reducer(),
    );

    nested
        .into_iter()
        .filter_map(|(month, by_region)| month.month().map(|m| (m, by_region)))
        .flat_map(|(month, by_region)| {
            by_region.into_iter().filter_map(move |(key, row)| match key {
                GroupValue::Region(region) => Some(EvolutionPoint {
                    month,
                    region,
                    tourist_count: row.tourist_count,
                }),
                _ => None,
            })
        })
        .collect()
}

/// Filters `set` when at least one bound is left open
///
/// A missing bound takes the earliest or latest month present. Bounds that
/// end up inverted select nothing.
fn within_open_bounds<R: Record + Clone>(set: &RecordSet<R>, params: &RegionalParams) -> RecordSet<R> {
    let months = set.months();
    let bounds = params
        .start
        .or_else(|| months.first().copied())
        .zip(params.end.or_else(|| months.last().copied()))
        .map(|(start, end)| (first_of_month(start), first_of_month(end)));

    match bounds {
        Some((start, end)) if start <= end => match MonthRange::new(start, end) {
            Ok(range) => filter_by_month_range(set, &range),
            Err(_) => set.derive(Vec::new()),
        },
        Some(_) => set.derive(Vec::new()),
        None => set.clone(),
    }
}
