//! Record grouping
//!
//! Partitions a record subset along one dimension and reduces each
//! partition: counts are summed, stay durations go through a pluggable
//! [`StayReducer`]. Partitions without records are never emitted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Record;

use super::{AggregatedRow, GroupKey, GroupValue, Grouped};

/// A stay duration together with the tourist volume behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaySample {
    pub duration: f64,
    pub tourists: u64,
}

/// Reduces the stay durations of one partition to a single value
pub trait StayReducer {
    /// `samples` is never empty when called by the aggregator
    fn reduce(&self, samples: &[StaySample]) -> f64;
}

/// Arithmetic mean of per-record durations, ignoring tourist volume
#[derive(Debug, Clone, Copy, Default)]
pub struct UnweightedMean;

impl StayReducer for UnweightedMean {
    fn reduce(&self, samples: &[StaySample]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().map(|s| s.duration).sum::<f64>() / samples.len() as f64
    }
}

/// Mean of per-record durations weighted by tourist volume
///
/// Falls back to the unweighted mean when the partition has no tourists.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouristWeightedMean;

impl StayReducer for TouristWeightedMean {
    fn reduce(&self, samples: &[StaySample]) -> f64 {
        let weight: u64 = samples.iter().map(|s| s.tourists).sum();
        if weight == 0 {
            return UnweightedMean.reduce(samples);
        }
        let weighted: f64 = samples
            .iter()
            .map(|s| s.duration * s.tourists as f64)
            .sum();
        weighted / weight as f64
    }
}

/// Configurable choice of stay reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StayAveraging {
    /// Plain mean of row values
    #[default]
    Unweighted,
    /// Mean weighted by tourist count
    Weighted,
}

impl StayAveraging {
    pub fn reducer(&self) -> &'static dyn StayReducer {
        match self {
            StayAveraging::Unweighted => &UnweightedMean,
            StayAveraging::Weighted => &TouristWeightedMean,
        }
    }
}

#[derive(Default)]
struct Partition {
    tourists: u64,
    stays: u64,
    samples: Vec<StaySample>,
    region: Option<String>,
    iso3: Option<String>,
}

/// Groups records by `key` using the unweighted stay mean
pub fn group_by<R: Record>(records: &[R], key: GroupKey) -> Grouped {
    group_by_with(records, key, &UnweightedMean)
}

/// Groups records by `key` with an explicit stay reducer
///
/// Records lacking the key's dimension (e.g. yearly rows grouped by month)
/// fall into no partition.
pub fn group_by_with<R, S>(records: &[R], key: GroupKey, reducer: &S) -> Grouped
where
    R: Record,
    S: StayReducer + ?Sized,
{
    let mut partitions: BTreeMap<GroupValue, Partition> = BTreeMap::new();

    for record in records {
        let Some(value) = key.value_of(record) else {
            continue;
        };
        let partition = partitions.entry(value).or_default();
        partition.tourists += record.tourist_count();
        partition.stays += record.overnight_stays();
        partition.samples.push(StaySample {
            duration: record.avg_stay_duration(),
            tourists: record.tourist_count(),
        });
        if partition.region.is_none() {
            partition.region = Some(record.region().to_string());
        }
        if partition.iso3.is_none() {
            partition.iso3 = record
                .iso3()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
        }
    }

    tracing::debug!(
        key = key.as_str(),
        records = records.len(),
        partitions = partitions.len(),
        "grouped records"
    );

    partitions
        .into_iter()
        .map(|(value, partition)| {
            let row = AggregatedRow {
                key: value.clone(),
                tourist_count: partition.tourists,
                overnight_stays: partition.stays,
                avg_stay_duration: reducer.reduce(&partition.samples),
                record_count: partition.samples.len(),
                region: partition.region,
                precoded_iso3: partition.iso3,
            };
            (value, row)
        })
        .collect()
}

/// Two-level grouping: an outer partition, each grouped again by `inner`
pub fn group_by_nested<R, S>(
    records: &[R],
    outer: GroupKey,
    inner: GroupKey,
    reducer: &S,
) -> BTreeMap<GroupValue, Grouped>
where
    R: Record,
    S: StayReducer + ?Sized,
{
    let mut buckets: BTreeMap<GroupValue, Vec<&R>> = BTreeMap::new();
    for record in records {
        if let Some(value) = outer.value_of(record) {
            buckets.entry(value).or_default().push(record);
        }
    }

    buckets
        .into_iter()
        .map(|(value, members)| (value, group_by_with(&members, inner, reducer)))
        .filter(|(_, grouped)| !grouped.is_empty())
        .collect()
}
