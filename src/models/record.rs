//! Tourism record types
//!
//! Two typed collections arrive from the data-loading collaborator: monthly
//! region-level rows and yearly country/hotel rows. Counts are expressed in
//! thousands, durations in days.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Read access shared by every record collection
///
/// Fields that only some collections carry (`month`, `year`, `iso3`)
/// default to `None`, so consumers always branch on presence.
pub trait Record {
    /// Country of origin as labelled in the source
    fn country(&self) -> &str;

    /// Continental/sub-continental region of origin
    fn region(&self) -> &str;

    /// Tourists, in thousands
    fn tourist_count(&self) -> u64;

    /// Overnight stays, in thousands
    fn overnight_stays(&self) -> u64;

    /// Average stay duration, in days
    fn avg_stay_duration(&self) -> f64;

    /// Calendar month (first day), for monthly collections
    fn month(&self) -> Option<NaiveDate> {
        None
    }

    /// Reference year, when the source carries one
    fn year(&self) -> Option<i32> {
        None
    }

    /// Pre-populated ISO3 code, when the source carries one
    fn iso3(&self) -> Option<&str> {
        None
    }

    /// Describes the first violated data invariant, if any
    fn invariant_violation(&self) -> Option<String> {
        let duration = self.avg_stay_duration();
        if !duration.is_finite() {
            return Some(format!("non-finite stay duration for {}", self.country()));
        }
        if duration < 0.0 {
            return Some(format!(
                "negative stay duration {} for {}",
                duration,
                self.country()
            ));
        }
        None
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn country(&self) -> &str {
        (**self).country()
    }

    fn region(&self) -> &str {
        (**self).region()
    }

    fn tourist_count(&self) -> u64 {
        (**self).tourist_count()
    }

    fn overnight_stays(&self) -> u64 {
        (**self).overnight_stays()
    }

    fn avg_stay_duration(&self) -> f64 {
        (**self).avg_stay_duration()
    }

    fn month(&self) -> Option<NaiveDate> {
        (**self).month()
    }

    fn year(&self) -> Option<i32> {
        (**self).year()
    }

    fn iso3(&self) -> Option<&str> {
        (**self).iso3()
    }
}

/// Monthly, region-granularity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegionRecord {
    /// Calendar month, normalised to its first day
    #[serde(with = "month_format")]
    pub month: NaiveDate,
    pub country: String,
    pub region: String,
    pub tourist_count: u64,
    pub overnight_stays: u64,
    pub avg_stay_duration: f64,
}

impl RegionRecord {
    pub fn new(
        month: NaiveDate,
        country: impl Into<String>,
        region: impl Into<String>,
        tourist_count: u64,
        overnight_stays: u64,
        avg_stay_duration: f64,
    ) -> Self {
        Self {
            month: first_of_month(month),
            country: country.into(),
            region: region.into(),
            tourist_count,
            overnight_stays,
            avg_stay_duration,
        }
    }
}

impl Record for RegionRecord {
    fn country(&self) -> &str {
        &self.country
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn tourist_count(&self) -> u64 {
        self.tourist_count
    }

    fn overnight_stays(&self) -> u64 {
        self.overnight_stays
    }

    fn avg_stay_duration(&self) -> f64 {
        self.avg_stay_duration
    }

    fn month(&self) -> Option<NaiveDate> {
        Some(self.month)
    }
}

/// Yearly, country/hotel-granularity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HotelRecord {
    /// Reference year; some sources have no year column at all
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    pub country: String,
    pub region: String,
    pub tourist_count: u64,
    pub overnight_stays: u64,
    pub avg_stay_duration: f64,
    /// Code shipped with the source, preferred over the static table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<String>,
}

impl HotelRecord {
    pub fn new(
        year: Option<i32>,
        country: impl Into<String>,
        region: impl Into<String>,
        tourist_count: u64,
        overnight_stays: u64,
        avg_stay_duration: f64,
    ) -> Self {
        Self {
            year,
            country: country.into(),
            region: region.into(),
            tourist_count,
            overnight_stays,
            avg_stay_duration,
            iso3: None,
        }
    }

    /// Attaches a pre-populated ISO3 code
    pub fn with_iso3(mut self, iso3: impl Into<String>) -> Self {
        self.iso3 = Some(iso3.into());
        self
    }
}

impl Record for HotelRecord {
    fn country(&self) -> &str {
        &self.country
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn tourist_count(&self) -> u64 {
        self.tourist_count
    }

    fn overnight_stays(&self) -> u64 {
        self.overnight_stays
    }

    fn avg_stay_duration(&self) -> f64 {
        self.avg_stay_duration
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn iso3(&self) -> Option<&str> {
        self.iso3.as_deref()
    }
}

/// Returns the first day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parses `YYYY-MM` or `YYYY-MM-DD` into the first day of that month
pub fn parse_month(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d"))
        .ok()
        .map(first_of_month)
}

mod month_format {
    use super::*;

    pub fn serialize<S>(month: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&month.format("%Y-%m").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_month(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid month: {}", raw)))
    }
}

/// Accepts a number, a numeric string, or null; anything else becomes `None`
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawYear {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let raw = Option::<RawYear>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawYear::Int(v)) => i32::try_from(v).ok(),
        Some(RawYear::Float(v)) if v.is_finite() && v.fract() == 0.0 => Some(v as i32),
        Some(RawYear::Text(s)) => s.trim().parse::<i32>().ok(),
        _ => None,
    })
}
