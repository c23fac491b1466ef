//! Geographic resolution
//!
//! Maps country-of-origin labels to ISO3 codes for map rendering and keeps
//! regional roll-up labels ("Autre Asie", "Europe (hors France)") out of
//! every per-country view. One resolver instance is built at startup and
//! shared by all consumers.

mod reference;
mod resolver;

pub use reference::{
    is_iso3, region_centroid, GeoPoint, ReferenceData, BUILTIN_AGGREGATE_NAMES,
    BUILTIN_ISO3_CODES, REFERENCE_VERSION, REGION_CENTROIDS,
};
pub use resolver::{
    CountryCodeResolver, CountryEntry, CountryResolution, ExcludedCountry, ExclusionReason,
    ResolvedEntry,
};

#[cfg(test)]
mod resolver_tests;
