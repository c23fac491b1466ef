//! Immutable in-memory record store
//!
//! The store is populated once at startup and never mutated afterwards, so
//! any number of recomputation passes may read it concurrently without
//! locking. Every pass works on its own filtered copies.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

use super::record::{HotelRecord, Record, RegionRecord};

/// Process-wide store slot, filled once by [`RecordStore::install`]
static GLOBAL_STORE: OnceCell<Arc<RecordStore>> = OnceCell::new();

/// A record collection together with its column presence flags
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet<R> {
    rows: Vec<R>,
    has_year: bool,
}

impl<R: Record> RecordSet<R> {
    /// Wraps rows, feature-detecting the year column from the data
    pub fn new(rows: Vec<R>) -> Self {
        let has_year = rows.iter().any(|r| r.year().is_some());
        Self { rows, has_year }
    }

    /// Wraps rows with an explicit year-column flag
    pub fn with_year_column(rows: Vec<R>, has_year: bool) -> Self {
        Self { rows, has_year }
    }

    /// Builds a subset that keeps this set's column flags
    pub fn derive(&self, rows: Vec<R>) -> Self {
        Self {
            rows,
            has_year: self.has_year,
        }
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the source schema carries a year column
    pub fn has_year(&self) -> bool {
        self.has_year
    }

    /// Distinct regions, sorted
    pub fn regions(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| r.region().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct years, sorted; empty when the year column is absent
    pub fn years(&self) -> Vec<i32> {
        if !self.has_year {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter_map(|r| r.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct months, sorted
    pub fn months(&self) -> Vec<NaiveDate> {
        self.rows
            .iter()
            .filter_map(|r| r.month())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// On-disk shape of a cleaned dataset
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatasetFile {
    #[serde(default)]
    pub regional: Vec<RegionRecord>,
    #[serde(default)]
    pub hotel: Vec<HotelRecord>,
}

/// Read-only holder of the two record collections
#[derive(Debug, Clone)]
pub struct RecordStore {
    regional: RecordSet<RegionRecord>,
    hotel: RecordSet<HotelRecord>,
}

impl RecordStore {
    /// Builds a store, rejecting records that break a data invariant
    pub fn new(regional: Vec<RegionRecord>, hotel: Vec<HotelRecord>) -> Result<Self> {
        check_records(&regional)?;
        check_records(&hotel)?;

        let store = Self {
            regional: RecordSet::new(regional),
            hotel: RecordSet::new(hotel),
        };
        tracing::info!(
            regional = store.regional.len(),
            hotel = store.hotel.len(),
            hotel_has_year = store.hotel.has_year(),
            "record store loaded"
        );
        Ok(store)
    }

    /// Loads a cleaned dataset from any JSON reader
    pub fn from_json_reader<T: Read>(reader: T) -> Result<Self> {
        let dataset: DatasetFile = serde_json::from_reader(reader)?;
        Self::new(dataset.regional, dataset.hotel)
    }

    /// Loads a cleaned dataset from a JSON file
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "reading dataset");
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn regional(&self) -> &RecordSet<RegionRecord> {
        &self.regional
    }

    pub fn hotel(&self) -> &RecordSet<HotelRecord> {
        &self.hotel
    }

    /// Places this store in the process-wide slot
    ///
    /// Only the first call succeeds; the store is never replaced.
    pub fn install(self) -> Result<Arc<RecordStore>> {
        let shared = Arc::new(self);
        GLOBAL_STORE
            .set(Arc::clone(&shared))
            .map_err(|_| DashboardError::StoreAlreadyInitialized)?;
        tracing::info!("record store installed");
        Ok(shared)
    }

    /// Returns the process-wide store
    pub fn global() -> Result<Arc<RecordStore>> {
        GLOBAL_STORE
            .get()
            .cloned()
            .ok_or(DashboardError::StoreNotInitialized)
    }
}

fn check_records<R: Record>(records: &[R]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if let Some(reason) = record.invariant_violation() {
            return Err(DashboardError::InvalidRecord { index, reason });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn month(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    const DATASET: &str = r#"{
        "regional": [
            {"month":"2023-01","country":"Chine","region":"Asie","tourist_count":100,"overnight_stays":500,"avg_stay_duration":5.0},
            {"month":"2023-02","country":"Japon","region":"Asie","tourist_count":50,"overnight_stays":100,"avg_stay_duration":2.0}
        ],
        "hotel": [
            {"year":2022,"country":"Chine","region":"Asie","tourist_count":10,"overnight_stays":30,"avg_stay_duration":3.0},
            {"year":2023,"country":"Canada","region":"Amérique du Nord","tourist_count":20,"overnight_stays":80,"avg_stay_duration":4.0,"iso3":"CAN"}
        ]
    }"#;

    #[test]
    fn test_from_json_reader() {
        let store = RecordStore::from_json_reader(DATASET.as_bytes()).unwrap();
        assert_eq!(store.regional().len(), 2);
        assert_eq!(store.hotel().len(), 2);
        assert!(store.hotel().has_year());
        assert!(!store.regional().has_year());
        assert_eq!(store.hotel().years(), vec![2022, 2023]);
        assert_eq!(store.regional().months(), vec![month(2023, 1), month(2023, 2)]);
        assert_eq!(
            store.hotel().regions(),
            vec!["Amérique du Nord".to_string(), "Asie".to_string()]
        );
    }

    #[test]
    fn test_from_json_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();
        let store = RecordStore::from_json_path(file.path()).unwrap();
        assert_eq!(store.regional().len(), 2);
    }

    #[test]
    fn test_missing_year_column_is_detected() {
        let hotel = vec![
            HotelRecord::new(None, "Chine", "Asie", 10, 30, 3.0),
            HotelRecord::new(None, "Inde", "Asie", 5, 10, 2.0),
        ];
        let store = RecordStore::new(Vec::new(), hotel).unwrap();
        assert!(!store.hotel().has_year());
        assert!(store.hotel().years().is_empty());
    }

    #[test]
    fn test_invalid_record_rejected() {
        let hotel = vec![
            HotelRecord::new(Some(2023), "Chine", "Asie", 10, 30, 3.0),
            HotelRecord::new(Some(2023), "Inde", "Asie", 5, 10, -2.0),
        ];
        let err = RecordStore::new(Vec::new(), hotel).unwrap_err();
        match err {
            DashboardError::InvalidRecord { index, .. } => assert_eq!(index, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = RecordStore::from_json_reader(r#"{"regional": [{"month": "soon"}]}"#.as_bytes())
            .unwrap_err();
        assert_eq!(err.code(), "JSON_ERROR");
    }

    #[test]
    fn test_install_once() {
        let store = RecordStore::from_json_reader(DATASET.as_bytes()).unwrap();
        let installed = store.clone().install().unwrap();
        let global = RecordStore::global().unwrap();
        assert!(Arc::ptr_eq(&installed, &global));

        let err = store.install().unwrap_err();
        assert_eq!(err.code(), "STORE_ALREADY_INITIALIZED");
    }
}
