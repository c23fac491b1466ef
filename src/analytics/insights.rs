//! Market insights over per-country rows
//!
//! Callers pass rows that already went through the country resolver.

use serde::Serialize;

use super::ranker::{bottom_n, top_n};
use super::{AggregatedRow, Metric, SortOrder};

/// Highlighted markets
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct MarketInsights {
    /// Markets generating the most nights per tourist
    pub high_intensity: Vec<AggregatedRow>,
    /// Above-median volume markets with the shortest stays
    pub short_stay_high_volume: Vec<AggregatedRow>,
}

/// Median of `values`, `None` when empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    })
}

/// Picks up to `count` markets for each insight
pub fn market_insights(country_rows: &[AggregatedRow], count: usize) -> MarketInsights {
    let high_intensity = top_n(
        country_rows,
        Metric::EconomicIntensity,
        count,
        SortOrder::Descending,
    );

    let volumes: Vec<f64> = country_rows.iter().map(|r| r.tourist_count as f64).collect();
    let short_stay_high_volume = match median(&volumes) {
        Some(median) => {
            let above: Vec<AggregatedRow> = country_rows
                .iter()
                .filter(|r| r.tourist_count as f64 > median)
                .cloned()
                .collect();
            bottom_n(&above, Metric::AvgStayDuration, count)
        }
        None => Vec::new(),
    };

    MarketInsights {
        high_intensity,
        short_stay_high_volume,
    }
}
