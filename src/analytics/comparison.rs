//! Multi-entity comparison
//!
//! Aligns aggregates for a small set of named entities and rescales them
//! against each other for normalised (radar) views.

use std::collections::{HashMap, HashSet};

use crate::models::Record;

use super::aggregator::{group_by_with, StayReducer, UnweightedMean};
use super::{
    AggregatedRow, ComparisonResult, GroupKey, Metric, NormalizedRow, NormalizedScore,
};

/// Aggregates the selected names side by side
///
/// Names without matching records are dropped from `rows` and listed in
/// `missing`. Duplicate selections are compared once.
pub fn compare<R: Record>(records: &[R], selected: &[String], key: GroupKey) -> ComparisonResult {
    compare_with(records, selected, key, &UnweightedMean)
}

/// [`compare`] with an explicit stay reducer
pub fn compare_with<R, S>(
    records: &[R],
    selected: &[String],
    key: GroupKey,
    reducer: &S,
) -> ComparisonResult
where
    R: Record,
    S: StayReducer + ?Sized,
{
    let mut seen = HashSet::new();
    let selection: Vec<&str> = selected
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && seen.insert(*s))
        .collect();

    let matching: Vec<&R> = records
        .iter()
        .filter(|r| {
            key.value_of(*r)
                .map_or(false, |v| selection.contains(&v.label().as_str()))
        })
        .collect();

    let mut by_label: HashMap<String, AggregatedRow> = group_by_with(&matching, key, reducer)
        .into_values()
        .map(|row| (row.name(), row))
        .collect();

    let mut rows = Vec::with_capacity(selection.len());
    let mut missing = Vec::new();
    for name in selection {
        match by_label.remove(name) {
            Some(row) => rows.push(row),
            None => missing.push(name.to_string()),
        }
    }

    tracing::debug!(
        key = key.as_str(),
        compared = rows.len(),
        missing = missing.len(),
        "comparison built"
    );
    ComparisonResult { key, rows, missing }
}

/// Rescales each field to 0-100 against its maximum among `rows`
///
/// A field whose maximum is 0 scores 0 for every row.
pub fn normalize(rows: &[AggregatedRow], fields: &[Metric]) -> Vec<NormalizedRow> {
    let maxima: Vec<f64> = fields
        .iter()
        .map(|&field| rows.iter().map(|r| r.metric(field)).fold(0.0, f64::max))
        .collect();

    rows.iter()
        .map(|row| NormalizedRow {
            name: row.name(),
            scores: fields
                .iter()
                .zip(&maxima)
                .map(|(&metric, &max)| NormalizedScore {
                    metric,
                    score: if max > 0.0 {
                        row.metric(metric) / max * 100.0
                    } else {
                        0.0
                    },
                })
                .collect(),
        })
        .collect()
}
