//! Histogram bucketing over fixed bin edges
//!
//! Intervals are right-closed `(a, b]`; the first one also includes its
//! lower edge. Values outside every interval are ignored and empty buckets
//! are not emitted.

use serde::Serialize;

use crate::error::{DashboardError, Result};

/// One non-empty histogram bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Checks that `edges` describe at least one interval, strictly increasing
pub fn validate_edges(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(DashboardError::config("bin edges need at least two values"));
    }
    if edges.iter().any(|e| !e.is_finite()) {
        return Err(DashboardError::config("bin edges must be finite"));
    }
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        return Err(DashboardError::config("bin edges must be strictly increasing"));
    }
    Ok(())
}

/// Counts `values` per interval of `edges`
pub fn bucketize(values: &[f64], edges: &[f64]) -> Vec<Bucket> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let mut counts = vec![0usize; edges.len() - 1];

    for &value in values {
        let slot = edges.windows(2).enumerate().position(|(i, w)| {
            let above_lower = if i == 0 { value >= w[0] } else { value > w[0] };
            above_lower && value <= w[1]
        });
        if let Some(slot) = slot {
            counts[slot] += 1;
        }
    }

    edges
        .windows(2)
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(w, count)| Bucket {
            lower: w[0],
            upper: w[1],
            count,
        })
        .collect()
}
