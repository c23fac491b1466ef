//! Top-N / bottom-N selection
//!
//! Ordering is stable: rows with equal metric values keep their relative
//! input order, so callers control tie-breaking through the order they pass
//! rows in.

use std::cmp::Ordering;

use super::{AggregatedRow, Metric, RankingResult, SortOrder};

/// Selects the `n` rows with the most extreme `metric` values
///
/// Returns every row, ranked, when `n` exceeds the row count.
pub fn top_n(
    rows: &[AggregatedRow],
    metric: Metric,
    n: usize,
    order: SortOrder,
) -> Vec<AggregatedRow> {
    let mut ranked: Vec<&AggregatedRow> = rows.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| {
        let (x, y) = (a.metric(metric), b.metric(metric));
        let ordering = match order {
            SortOrder::Descending => y.partial_cmp(&x),
            SortOrder::Ascending => x.partial_cmp(&y),
        };
        ordering.unwrap_or(Ordering::Equal)
    });
    ranked.into_iter().take(n).cloned().collect()
}

/// Smallest-first counterpart of [`top_n`]
pub fn bottom_n(rows: &[AggregatedRow], metric: Metric, n: usize) -> Vec<AggregatedRow> {
    top_n(rows, metric, n, SortOrder::Ascending)
}

/// Wraps [`top_n`] with the ranking parameters for the presentation layer
pub fn rank(rows: &[AggregatedRow], metric: Metric, n: usize, order: SortOrder) -> RankingResult {
    RankingResult {
        metric,
        order,
        requested: n,
        rows: top_n(rows, metric, n, order),
    }
}
