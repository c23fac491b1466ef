//! Dashboard configuration
//!
//! Loaded from `dashboard.yaml` in the configuration directory; a missing
//! file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analytics::aggregator::StayAveraging;
use crate::analytics::distribution::validate_edges;
use crate::analytics::ALL_REGIONS;
use crate::error::{DashboardError, Result};
use crate::geo::ReferenceData;

/// Configuration file name
const CONFIG_FILENAME: &str = "dashboard.yaml";

/// Directory name under the platform config dir
const APP_DIRNAME: &str = "tourism-dashboard";

/// Ranking slider bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopNConfig {
    pub default: usize,
    pub min: usize,
    pub max: usize,
    pub step: usize,
}

impl Default for TopNConfig {
    fn default() -> Self {
        Self {
            default: 20,
            min: 5,
            max: 50,
            step: 5,
        }
    }
}

impl TopNConfig {
    /// Clamps a requested N into `[min, max]`; `None` means the default
    pub fn clamp(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default).clamp(self.min, self.max)
    }
}

/// Dashboard settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Region selection meaning "no filter"
    pub all_regions_label: String,

    pub top_n: TopNConfig,

    /// Regional top chart size
    pub top_regions: usize,

    /// Countries shown on the economic scatter, by tourist volume
    pub scatter_limit: usize,

    /// Markets per insight list
    pub insight_count: usize,

    /// Comparison selection cap
    pub max_compared: usize,

    /// Rows of the international country table
    pub table_limit: usize,

    pub stay_averaging: StayAveraging,

    /// Bin edges for mean stay durations (days)
    pub duration_bins: Vec<f64>,

    /// Bin edges for tourist volumes (thousands)
    pub volume_bins: Vec<f64>,

    /// Extra entries for the country resolver
    #[serde(skip_serializing_if = "ReferenceData::is_empty")]
    pub reference: ReferenceData,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            all_regions_label: ALL_REGIONS.to_string(),
            top_n: TopNConfig::default(),
            top_regions: 10,
            scatter_limit: 20,
            insight_count: 3,
            max_compared: 5,
            table_limit: 100,
            stay_averaging: StayAveraging::default(),
            duration_bins: vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 100.0],
            volume_bins: vec![0.0, 1000.0, 5000.0, 10000.0, 20000.0, 50000.0, 200000.0],
            reference: ReferenceData::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from a directory
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding `dashboard.yaml`
    ///
    /// # Returns
    /// The defaults when the file does not exist; an error when it exists
    /// but cannot be read, parsed, or validated
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = Self::config_path(config_dir);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::info!(path = %config_path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads configuration from the platform config directory
    pub fn load_default() -> Result<Self> {
        match Self::default_dir() {
            Some(dir) => Self::load(&dir),
            None => Ok(Self::default()),
        }
    }

    /// Saves configuration to a directory, creating it if needed
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(Self::config_path(config_dir), content)?;
        Ok(())
    }

    /// `<platform config dir>/tourism-dashboard`
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIRNAME))
    }

    /// Full path of the configuration file
    pub fn config_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILENAME)
    }

    /// Checks bounds, bin edges and reference entries
    pub fn validate(&self) -> Result<()> {
        let top_n = &self.top_n;
        if top_n.min > top_n.max {
            return Err(DashboardError::config(format!(
                "top_n.min ({}) exceeds top_n.max ({})",
                top_n.min, top_n.max
            )));
        }
        if top_n.step == 0 {
            return Err(DashboardError::config("top_n.step must be positive"));
        }
        if top_n.default < top_n.min || top_n.default > top_n.max {
            return Err(DashboardError::config(format!(
                "top_n.default ({}) outside [{}, {}]",
                top_n.default, top_n.min, top_n.max
            )));
        }
        if self.max_compared == 0 {
            return Err(DashboardError::config("max_compared must be positive"));
        }
        validate_edges(&self.duration_bins)?;
        validate_edges(&self.volume_bins)?;
        self.reference.validate()
    }
}
