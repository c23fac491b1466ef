//! Versioned geographic reference data
//!
//! Hand-maintained tables: country name to ISO3 code, the pseudo-country
//! labels that denote regional roll-ups, and map anchors per origin region.
//! Several historical name variants may share one code.

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Version tag of the builtin tables
pub const REFERENCE_VERSION: &str = "2024.1";

const ISO3_ENTRIES: &[(&str, &str)] = &[
    // Americas
    ("Canada", "CAN"),
    ("États-Unis", "USA"),
    ("États-Unis (y compris Hawaii)", "USA"),
    ("Hawaii", "USA"),
    ("USA", "USA"),
    ("Mexique", "MEX"),
    ("Brésil", "BRA"),
    ("Argentine", "ARG"),
    ("Chili", "CHL"),
    ("Colombie", "COL"),
    ("Pérou", "PER"),
    ("Venezuela", "VEN"),
    ("Uruguay", "URY"),
    // Europe
    ("Royaume-Uni", "GBR"),
    ("Allemagne", "DEU"),
    ("Italie", "ITA"),
    ("Espagne", "ESP"),
    ("France", "FRA"),
    ("Belgique", "BEL"),
    ("Pays-Bas", "NLD"),
    ("Suisse", "CHE"),
    ("Autriche", "AUT"),
    ("Portugal", "PRT"),
    ("Grèce", "GRC"),
    ("Pologne", "POL"),
    ("Suède", "SWE"),
    ("Norvège", "NOR"),
    ("Danemark", "DNK"),
    ("Finlande", "FIN"),
    ("Irlande", "IRL"),
    ("Islande", "ISL"),
    ("Luxembourg", "LUX"),
    ("Hongrie", "HUN"),
    ("République tchèque", "CZE"),
    ("Roumanie", "ROU"),
    ("Bulgarie", "BGR"),
    ("Croatie", "HRV"),
    ("Slovénie", "SVN"),
    ("Slovaquie", "SVK"),
    ("Estonie", "EST"),
    ("Lettonie", "LVA"),
    ("Lituanie", "LTU"),
    ("Serbie", "SRB"),
    ("Ukraine", "UKR"),
    ("Russie", "RUS"),
    ("Turquie", "TUR"),
    // Asia & Oceania
    ("Chine", "CHN"),
    ("Japon", "JPN"),
    ("Corée du Sud", "KOR"),
    ("Inde", "IND"),
    ("Thaïlande", "THA"),
    ("Vietnam", "VNM"),
    ("Singapour", "SGP"),
    ("Malaisie", "MYS"),
    ("Indonésie", "IDN"),
    ("Philippines", "PHL"),
    ("Hong Kong", "HKG"),
    ("Taïwan", "TWN"),
    ("Australie", "AUS"),
    ("Nouvelle-Zélande", "NZL"),
    ("Papouasie-Nouvelle-Guinée", "PNG"),
    ("Pakistan", "PAK"),
    ("Bangladesh", "BGD"),
    ("Sri Lanka", "LKA"),
    ("Népal", "NPL"),
    ("Afghanistan", "AFG"),
    // Africa
    ("Afrique du Sud", "ZAF"),
    ("Égypte", "EGY"),
    ("Maroc", "MAR"),
    ("Tunisie", "TUN"),
    ("Algérie", "DZA"),
    ("Kenya", "KEN"),
    ("Nigeria", "NGA"),
    ("Éthiopie", "ETH"),
    // Middle East
    ("Arabie Saoudite", "SAU"),
    ("Israël", "ISR"),
    ("Émirats Arabes Unis", "ARE"),
    ("Qatar", "QAT"),
    ("Koweït", "KWT"),
    ("Liban", "LBN"),
    ("Jordanie", "JOR"),
    ("Oman", "OMN"),
    ("Bahreïn", "BHR"),
    ("Iran", "IRN"),
    ("Irak", "IRQ"),
    ("Syrie", "SYR"),
    ("Yémen", "YEM"),
];

const AGGREGATE_ENTRIES: &[&str] = &[
    "Autre Asie",
    "Autre Amérique du Sud",
    "Autre Amérique Centrale",
    "Europe (hors France)",
    "Asie",
    "Pacifique",
    "Afrique",
    "Amérique du Sud",
    "Amérique Centrale",
    "Autres Pays",
    // English labels used by some exports
    "Other Asia",
    "Other South America",
    "Other Central America",
    "Europe (excl. France)",
    "Asia",
    "Pacific",
    "Africa",
    "South America",
    "Central America",
    "Other Countries",
];

const REGION_CENTROID_ENTRIES: &[(&str, f64, f64)] = &[
    ("Europe", 50.0, 10.0),
    ("Europe (hors France)", 50.0, 10.0),
    ("Asie", 35.0, 105.0),
    ("Amérique du Nord", 45.0, -100.0),
    ("Amérique du Sud", -15.0, -60.0),
    ("Amérique Centrale", 15.0, -90.0),
    ("Afrique", 0.0, 20.0),
    ("Océanie", -25.0, 135.0),
    ("Moyen-Orient", 30.0, 45.0),
];

/// Builtin country name to ISO3 table
pub static BUILTIN_ISO3_CODES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ISO3_ENTRIES.iter().copied().collect());

/// Builtin pseudo-country labels
pub static BUILTIN_AGGREGATE_NAMES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| AGGREGATE_ENTRIES.iter().copied().collect());

/// Map anchor per origin region
pub static REGION_CENTROIDS: Lazy<HashMap<&'static str, GeoPoint>> = Lazy::new(|| {
    REGION_CENTROID_ENTRIES
        .iter()
        .map(|&(name, lat, lon)| (name, GeoPoint { lat, lon }))
        .collect()
});

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Map anchor for an origin region, if one is defined
pub fn region_centroid(region: &str) -> Option<GeoPoint> {
    REGION_CENTROIDS.get(region.trim()).copied()
}

/// Additional reference entries layered over the builtin tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReferenceData {
    /// Extra country name to ISO3 entries
    #[serde(default)]
    pub codes: BTreeMap<String, String>,

    /// Extra pseudo-country labels
    #[serde(default)]
    pub aggregates: Vec<String>,
}

impl ReferenceData {
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty() && self.aggregates.is_empty()
    }

    /// Checks that every code is exactly three uppercase ASCII letters
    pub fn validate(&self) -> Result<()> {
        for (name, code) in &self.codes {
            if name.trim().is_empty() {
                return Err(DashboardError::config("reference code with empty country name"));
            }
            if !is_iso3(code) {
                return Err(DashboardError::config(format!(
                    "invalid ISO3 code '{}' for '{}'",
                    code, name
                )));
            }
        }
        if self.aggregates.iter().any(|a| a.trim().is_empty()) {
            return Err(DashboardError::config("empty aggregate name"));
        }
        Ok(())
    }
}

/// Whether `code` has the shape of an ISO 3166-1 alpha-3 code
pub fn is_iso3(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}
