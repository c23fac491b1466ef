//! Derived metric calculation
//!
//! Functions for computing economic intensity and headline figures from
//! aggregated rows and filtered record subsets.

use crate::models::Record;

use super::aggregator::group_by;
use super::ranker::top_n;
use super::{AggregatedRow, GroupKey, Grouped, Metric, SortOrder, Summary};

/// Overnight stays per tourist
///
/// Returns 0 when there are no tourists; never NaN or infinite.
pub fn intensity(overnight_stays: u64, tourist_count: u64) -> f64 {
    if tourist_count > 0 {
        overnight_stays as f64 / tourist_count as f64
    } else {
        0.0
    }
}

/// Reads `metric` off an aggregated row
pub fn metric_value(row: &AggregatedRow, metric: Metric) -> f64 {
    match metric {
        Metric::TouristCount => row.tourist_count as f64,
        Metric::OvernightStays => row.overnight_stays as f64,
        Metric::AvgStayDuration => row.avg_stay_duration,
        Metric::EconomicIntensity => row.economic_intensity(),
    }
}

/// Materialises grouped rows in key order
pub fn rows_of(grouped: Grouped) -> Vec<AggregatedRow> {
    grouped.into_values().collect()
}

/// Calculates headline figures over a record subset
///
/// The mean stay duration is the unweighted mean over records, and the top
/// country is the alphabetically first one among equal tourist totals.
///
/// # Arguments
/// * `records` - The filtered subset to summarize
///
/// # Returns
/// A zeroed Summary when `records` is empty
pub fn summarize<R: Record>(records: &[R]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }

    let total_tourists: u64 = records.iter().map(|r| r.tourist_count()).sum();
    let total_overnight_stays: u64 = records.iter().map(|r| r.overnight_stays()).sum();
    let duration_sum: f64 = records.iter().map(|r| r.avg_stay_duration()).sum();

    let countries = rows_of(group_by(records, GroupKey::Country));
    let top_country = top_n(&countries, Metric::TouristCount, 1, SortOrder::Descending)
        .into_iter()
        .next()
        .map(|row| row.name());

    Summary {
        total_tourists,
        total_overnight_stays,
        mean_stay_duration: duration_sum / records.len() as f64,
        economic_intensity: intensity(total_overnight_stays, total_tourists),
        record_count: records.len(),
        top_country,
    }
}
