//! Record filtering
//!
//! Region, year and month-range predicates over a [`RecordSet`]. Each
//! filter returns a fresh subset and leaves its input untouched; an empty
//! result is a normal outcome.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::models::{first_of_month, Record, RecordSet};

use super::RegionFilter;

/// Inclusive range of calendar months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl MonthRange {
    /// Builds a range over the months containing `start` and `end`
    ///
    /// Rejects `start > end` instead of swapping the bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let (start, end) = (first_of_month(start), first_of_month(end));
        if start > end {
            tracing::warn!(%start, %end, "rejected inverted month range");
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, month: NaiveDate) -> bool {
        let month = first_of_month(month);
        self.start <= month && month <= self.end
    }
}

/// Keeps records of one region; the `All` sentinel passes everything through
pub fn filter_by_region<R: Record + Clone>(set: &RecordSet<R>, region: &RegionFilter) -> RecordSet<R> {
    if region.is_all() {
        return set.clone();
    }
    let rows: Vec<R> = set
        .rows()
        .iter()
        .filter(|r| region.matches(r.region()))
        .cloned()
        .collect();
    tracing::debug!(input = set.len(), output = rows.len(), ?region, "filtered by region");
    set.derive(rows)
}

/// Keeps records of one year
///
/// Passes everything through when no year is given or when the set has no
/// year column. Records without a year never match a given year.
pub fn filter_by_year<R: Record + Clone>(set: &RecordSet<R>, year: Option<i32>) -> RecordSet<R> {
    let Some(year) = year.filter(|_| set.has_year()) else {
        return set.clone();
    };
    let rows: Vec<R> = set
        .rows()
        .iter()
        .filter(|r| r.year() == Some(year))
        .cloned()
        .collect();
    tracing::debug!(input = set.len(), output = rows.len(), year, "filtered by year");
    set.derive(rows)
}

/// Keeps records whose month lies in `range`
///
/// Records without a month never match.
pub fn filter_by_month_range<R: Record + Clone>(set: &RecordSet<R>, range: &MonthRange) -> RecordSet<R> {
    let rows: Vec<R> = set
        .rows()
        .iter()
        .filter(|r| r.month().map_or(false, |m| range.contains(m)))
        .cloned()
        .collect();
    tracing::debug!(
        input = set.len(),
        output = rows.len(),
        start = %range.start(),
        end = %range.end(),
        "filtered by month range"
    );
    set.derive(rows)
}

/// Keeps records whose month lies between `start` and `end`, inclusive
pub fn filter_by_date_range<R: Record + Clone>(
    set: &RecordSet<R>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RecordSet<R>> {
    let range = MonthRange::new(start, end)?;
    Ok(filter_by_month_range(set, &range))
}
