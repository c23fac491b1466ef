//! Dashboard views
//!
//! Each view is a pure function of its parameters and the shared
//! [`DashboardState`]. Views never mutate the state, so any number of them
//! may run at once against the same store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::aggregator::{group_by_with, StayReducer};
use crate::analytics::calculator::rows_of;
use crate::analytics::ranker::top_n;
use crate::analytics::{AggregatedRow, GroupKey, Metric, RegionFilter, SortOrder};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::geo::{CountryCodeResolver, CountryResolution, ExcludedCountry, ResolvedEntry};
use crate::models::{Record, RecordStore};

pub mod economic;
pub mod international;
pub mod overview;
pub mod regional;


pub use economic::*;
pub use international::*;
pub use overview::*;
pub use regional::*;

/// A resolved per-country row, carrying its ISO3 code
pub type CountryRow = ResolvedEntry<AggregatedRow>;

/// Immutable inputs shared by every view
#[derive(Debug, Clone)]
pub struct DashboardState {
    store: Arc<RecordStore>,
    resolver: Arc<CountryCodeResolver>,
    config: DashboardConfig,
}

impl DashboardState {
    pub fn new(
        store: Arc<RecordStore>,
        resolver: Arc<CountryCodeResolver>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            store,
            resolver,
            config,
        }
    }

    /// Builds the single shared resolver from the configured reference data
    pub fn from_config(store: Arc<RecordStore>, config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let resolver = if config.reference.is_empty() {
            CountryCodeResolver::builtin()
        } else {
            CountryCodeResolver::with_reference(&config.reference)?
        };
        tracing::info!(
            codes = resolver.code_count(),
            aggregates = resolver.aggregate_count(),
            stay_averaging = ?config.stay_averaging,
            "dashboard state ready"
        );
        Ok(Self::new(store, Arc::new(resolver), config))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn resolver(&self) -> &CountryCodeResolver {
        &self.resolver
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Interprets a region selection against the configured sentinel
    pub fn region_filter(&self, selection: &str) -> RegionFilter {
        RegionFilter::from_selection_with(selection, &self.config.all_regions_label)
    }

    /// Stay reducer chosen by configuration
    pub fn reducer(&self) -> &'static dyn StayReducer {
        self.config.stay_averaging.reducer()
    }

    /// Groups `records` by country and keeps individual, resolvable countries
    pub fn resolve_countries<R: Record>(&self, records: &[R]) -> CountryResolution<AggregatedRow> {
        let countries = rows_of(group_by_with(records, GroupKey::Country, self.reducer()));
        self.resolver.filter_to_individual_countries(&countries)
    }

    /// Values offered by the selection widgets
    pub fn filter_options(&self) -> FilterOptions {
        let hotel = self.store.hotel();
        let regional = self.store.regional();

        let mut regions = vec![self.config.all_regions_label.clone()];
        regions.extend(hotel.regions());

        let years = hotel.years();
        FilterOptions {
            regions,
            default_year: years.last().copied(),
            years,
            regional_regions: regional.regions(),
            months: regional.months(),
        }
    }
}

/// Selection widget contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Sentinel first, then the sorted distinct regions of yearly data
    pub regions: Vec<String>,
    /// Sorted distinct years, empty without a year column
    pub years: Vec<i32>,
    /// Latest year
    pub default_year: Option<i32>,
    /// Sorted distinct regions of monthly data
    pub regional_regions: Vec<String>,
    /// Sorted distinct months for the range slider
    pub months: Vec<NaiveDate>,
}

/// "N of M countries shown" with the reasons for the rest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCoverage {
    pub shown: usize,
    pub total: usize,
    pub excluded: Vec<ExcludedCountry>,
}

impl CountryCoverage {
    pub fn of<T>(resolution: &CountryResolution<T>) -> Self {
        Self {
            shown: resolution.shown(),
            total: resolution.total(),
            excluded: resolution.excluded.clone(),
        }
    }
}

/// Records whose country survived resolution
pub(crate) fn records_of_countries<R: Record + Clone>(
    records: &[R],
    countries: &[CountryRow],
) -> Vec<R> {
    let names: HashSet<String> = countries.iter().map(|c| c.entry.name()).collect();
    records
        .iter()
        .filter(|r| names.contains(r.country()))
        .cloned()
        .collect()
}

/// Ranks resolved countries, keeping each row's code
pub(crate) fn rank_countries(
    countries: &[CountryRow],
    metric: Metric,
    n: usize,
    order: SortOrder,
) -> Vec<CountryRow> {
    let codes: HashMap<String, &str> = countries
        .iter()
        .map(|c| (c.entry.name(), c.iso3.as_str()))
        .collect();
    let rows: Vec<AggregatedRow> = countries.iter().map(|c| c.entry.clone()).collect();

    top_n(&rows, metric, n, order)
        .into_iter()
        .filter_map(|row| {
            let iso3 = codes.get(&row.name())?.to_string();
            Some(CountryRow { iso3, entry: row })
        })
        .collect()
}
