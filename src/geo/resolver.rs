//! Country identity resolution
//!
//! Every country-level geographic output passes through
//! [`CountryCodeResolver::filter_to_individual_countries`], so regional
//! and international views share one table and one exclusion rule.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::Result;
use crate::models::{HotelRecord, RegionRecord};

use super::reference::{ReferenceData, BUILTIN_AGGREGATE_NAMES, BUILTIN_ISO3_CODES};

/// Anything carrying a country name and, optionally, its own code
pub trait CountryEntry {
    fn country_name(&self) -> &str;

    fn precoded_iso3(&self) -> Option<&str> {
        None
    }
}

impl CountryEntry for RegionRecord {
    fn country_name(&self) -> &str {
        &self.country
    }
}

impl CountryEntry for HotelRecord {
    fn country_name(&self) -> &str {
        &self.country
    }

    fn precoded_iso3(&self) -> Option<&str> {
        self.iso3.as_deref()
    }
}

/// Why an entry was left out of country-level output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Regional roll-up label such as "Autre Asie"
    AggregateName,
    /// Not in the code table and not pre-coded
    UnknownCountry,
}

/// An entry left out of country-level output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedCountry {
    pub name: String,
    pub reason: ExclusionReason,
}

/// An entry that resolved to a geographic code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntry<T> {
    pub iso3: String,
    #[serde(flatten)]
    pub entry: T,
}

/// Outcome of splitting entries into individual countries and the rest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryResolution<T> {
    pub resolved: Vec<ResolvedEntry<T>>,
    pub excluded: Vec<ExcludedCountry>,
}

impl<T> CountryResolution<T> {
    /// Entries examined
    pub fn total(&self) -> usize {
        self.resolved.len() + self.excluded.len()
    }

    /// Entries shown as individual countries
    pub fn shown(&self) -> usize {
        self.resolved.len()
    }

    /// Entries left out
    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    /// Drops the codes, keeping the resolved entries in order
    pub fn into_entries(self) -> Vec<T> {
        self.resolved.into_iter().map(|r| r.entry).collect()
    }
}

/// Country name to ISO3 resolver with aggregate-label detection
#[derive(Debug, Clone)]
pub struct CountryCodeResolver {
    codes: HashMap<String, String>,
    aggregates: HashSet<String>,
}

impl CountryCodeResolver {
    /// Resolver over the builtin reference tables
    pub fn builtin() -> Self {
        Self {
            codes: BUILTIN_ISO3_CODES
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
            aggregates: BUILTIN_AGGREGATE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Builtin tables extended with validated extra entries
    pub fn with_reference(extra: &ReferenceData) -> Result<Self> {
        extra.validate()?;
        let mut resolver = Self::builtin();
        for (name, code) in &extra.codes {
            resolver.codes.insert(name.trim().to_string(), code.clone());
        }
        for name in &extra.aggregates {
            resolver.aggregates.insert(name.trim().to_string());
        }
        tracing::debug!(
            codes = resolver.codes.len(),
            aggregates = resolver.aggregates.len(),
            "country resolver built with extra reference data"
        );
        Ok(resolver)
    }

    /// Canonical code for `name`
    ///
    /// A non-blank pre-populated code wins over the static table.
    pub fn resolve<'a>(&'a self, name: &str, precoded: Option<&'a str>) -> Option<&'a str> {
        if let Some(code) = precoded.map(str::trim).filter(|c| !c.is_empty()) {
            return Some(code);
        }
        self.codes.get(name.trim()).map(String::as_str)
    }

    /// Whether `name` is a regional roll-up label
    pub fn is_aggregate(&self, name: &str) -> bool {
        self.aggregates.contains(name.trim())
    }

    /// Keeps the entries that denote individual, resolvable countries
    pub fn filter_to_individual_countries<T>(&self, entries: &[T]) -> CountryResolution<T>
    where
        T: CountryEntry + Clone,
    {
        let mut resolved = Vec::new();
        let mut excluded = Vec::new();

        for entry in entries {
            let name = entry.country_name();
            if self.is_aggregate(name) {
                tracing::trace!(country = name, "excluded aggregate label");
                excluded.push(ExcludedCountry {
                    name: name.to_string(),
                    reason: ExclusionReason::AggregateName,
                });
                continue;
            }
            match self.resolve(name, entry.precoded_iso3()) {
                Some(code) => resolved.push(ResolvedEntry {
                    iso3: code.to_string(),
                    entry: entry.clone(),
                }),
                None => {
                    tracing::trace!(country = name, "excluded unresolvable country");
                    excluded.push(ExcludedCountry {
                        name: name.to_string(),
                        reason: ExclusionReason::UnknownCountry,
                    });
                }
            }
        }

        tracing::debug!(
            total = entries.len(),
            shown = resolved.len(),
            excluded = excluded.len(),
            "country resolution"
        );
        CountryResolution { resolved, excluded }
    }

    pub fn code_count(&self) -> usize {
        self.codes.len()
    }

    pub fn aggregate_count(&self) -> usize {
        self.aggregates.len()
    }
}

impl Default for CountryCodeResolver {
    fn default() -> Self {
        Self::builtin()
    }
}
