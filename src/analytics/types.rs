//! Analytics type definitions
//!
//! Contains grouping keys, metric selectors and the aggregated rows handed
//! to the presentation layer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::geo::CountryEntry;
use crate::models::Record;

use super::calculator;

/// Sentinel selection meaning "no region filter"
pub const ALL_REGIONS: &str = "All";

/// French UI label for the same sentinel
pub const ALL_REGIONS_FR: &str = "Tous";

/// Region predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "region")]
pub enum RegionFilter {
    /// Every region (the "All" sentinel)
    #[default]
    All,
    /// Exactly this region
    Only(String),
}

impl RegionFilter {
    /// Interprets a UI selection, treating the sentinel labels as `All`
    pub fn from_selection(selection: &str) -> Self {
        Self::from_selection_with(selection, ALL_REGIONS)
    }

    /// Like [`RegionFilter::from_selection`] with a custom sentinel label
    pub fn from_selection_with(selection: &str, all_label: &str) -> Self {
        let selection = selection.trim();
        if selection.is_empty()
            || selection == all_label
            || selection == ALL_REGIONS
            || selection == ALL_REGIONS_FR
        {
            RegionFilter::All
        } else {
            RegionFilter::Only(selection.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, RegionFilter::All)
    }

    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(wanted) => wanted == region,
        }
    }
}

/// Dimension used to partition records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Country,
    Region,
    Month,
}

impl GroupKey {
    /// The partition a record falls into, if the record carries this dimension
    pub fn value_of<R: Record>(&self, record: &R) -> Option<GroupValue> {
        match self {
            GroupKey::Country => Some(GroupValue::Country(record.country().to_string())),
            GroupKey::Region => Some(GroupValue::Region(record.region().to_string())),
            GroupKey::Month => record.month().map(GroupValue::Month),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Country => "country",
            GroupKey::Region => "region",
            GroupKey::Month => "month",
        }
    }
}

/// Value of a grouping key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum GroupValue {
    Country(String),
    Region(String),
    Month(NaiveDate),
}

impl GroupValue {
    /// Label used to match user selections (`YYYY-MM` for months)
    pub fn label(&self) -> String {
        match self {
            GroupValue::Country(name) | GroupValue::Region(name) => name.clone(),
            GroupValue::Month(month) => month.format("%Y-%m").to_string(),
        }
    }

    /// Country or region name
    pub fn name(&self) -> Option<&str> {
        match self {
            GroupValue::Country(name) | GroupValue::Region(name) => Some(name),
            GroupValue::Month(_) => None,
        }
    }

    pub fn month(&self) -> Option<NaiveDate> {
        match self {
            GroupValue::Month(month) => Some(*month),
            _ => None,
        }
    }

    pub fn key(&self) -> GroupKey {
        match self {
            GroupValue::Country(_) => GroupKey::Country,
            GroupValue::Region(_) => GroupKey::Region,
            GroupValue::Month(_) => GroupKey::Month,
        }
    }
}

/// Numeric field a view can rank or compare on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    TouristCount,
    OvernightStays,
    AvgStayDuration,
    EconomicIntensity,
}

impl Metric {
    /// Fields of the normalised (radar) comparison
    pub const RADAR: [Metric; 3] = [
        Metric::TouristCount,
        Metric::OvernightStays,
        Metric::AvgStayDuration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::TouristCount => "tourist_count",
            Metric::OvernightStays => "overnight_stays",
            Metric::AvgStayDuration => "avg_stay_duration",
            Metric::EconomicIntensity => "economic_intensity",
        }
    }
}

/// Ranking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Largest first (default)
    #[default]
    Descending,
    /// Smallest first
    Ascending,
}

/// One partition of a grouped record subset
///
/// Economic intensity is derived on demand and only materialised when the
/// row is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    /// Partition key
    pub key: GroupValue,

    /// Sum of tourists (thousands)
    pub tourist_count: u64,

    /// Sum of overnight stays (thousands)
    pub overnight_stays: u64,

    /// Reduced stay duration (unweighted mean unless configured otherwise)
    pub avg_stay_duration: f64,

    /// Number of records in the partition
    pub record_count: usize,

    /// First region seen in the partition
    pub region: Option<String>,

    /// First non-blank pre-populated code seen in the partition
    pub precoded_iso3: Option<String>,
}

impl AggregatedRow {
    /// Country, region, or month label of this row
    pub fn name(&self) -> String {
        self.key.label()
    }

    /// Nights per tourist, 0 when there are no tourists
    pub fn economic_intensity(&self) -> f64 {
        calculator::intensity(self.overnight_stays, self.tourist_count)
    }

    /// Value of `metric` for this row
    pub fn metric(&self, metric: Metric) -> f64 {
        calculator::metric_value(self, metric)
    }
}

impl CountryEntry for AggregatedRow {
    fn country_name(&self) -> &str {
        self.key.name().unwrap_or_default()
    }

    fn precoded_iso3(&self) -> Option<&str> {
        self.precoded_iso3.as_deref()
    }
}

/// Serialized shape of an [`AggregatedRow`]
#[derive(Serialize)]
struct AggregatedRowView<'a> {
    key: &'a GroupValue,
    name: String,
    tourist_count: u64,
    overnight_stays: u64,
    avg_stay_duration: f64,
    economic_intensity: f64,
    record_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'a str>,
}

impl Serialize for AggregatedRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        AggregatedRowView {
            key: &self.key,
            name: self.name(),
            tourist_count: self.tourist_count,
            overnight_stays: self.overnight_stays,
            avg_stay_duration: self.avg_stay_duration,
            economic_intensity: self.economic_intensity(),
            record_count: self.record_count,
            region: self.region.as_deref(),
        }
        .serialize(serializer)
    }
}

/// Keyed output of the aggregator
pub type Grouped = BTreeMap<GroupValue, AggregatedRow>;

/// Row of a side-by-side comparison
pub type ComparisonRow = AggregatedRow;

/// Top-N / bottom-N selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    pub metric: Metric,
    pub order: SortOrder,
    /// N as requested
    pub requested: usize,
    /// At most `requested` rows, in ranked order
    pub rows: Vec<AggregatedRow>,
}

/// Aligned rows for a set of selected names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub key: GroupKey,
    /// One row per selected name that has data, in selection order
    pub rows: Vec<ComparisonRow>,
    /// Selected names without any matching record
    pub missing: Vec<String>,
}

/// One field of a normalised comparison, on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedScore {
    pub metric: Metric,
    pub score: f64,
}

/// A compared row rescaled against the other compared rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub name: String,
    pub scores: Vec<NormalizedScore>,
}

/// Headline figures over a filtered subset
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Summary {
    pub total_tourists: u64,
    pub total_overnight_stays: u64,
    /// Unweighted mean of per-record stay durations, 0 when empty
    pub mean_stay_duration: f64,
    /// Total stays over total tourists, 0 when there are no tourists
    pub economic_intensity: f64,
    pub record_count: usize,
    /// Country with the most tourists
    pub top_country: Option<String>,
}
