// Tourism Dashboard Library
// Aggregation and geographic resolution behind the tourism dashboard views

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geo;
pub mod logging;
pub mod models;

use std::path::Path;

pub use config::DashboardConfig;
pub use dashboard::DashboardState;
pub use error::{DashboardError, ErrorResponse, Result};
pub use models::RecordStore;

/// Loads configuration and data, and builds the shared dashboard state
///
/// # Arguments
/// * `dataset` - Cleaned dataset in JSON form
/// * `config_dir` - Directory holding `dashboard.yaml`; the platform
///   config directory when `None`
///
/// # Returns
/// The state every view reads from; the record store is installed in the
/// process-wide slot along the way
pub fn bootstrap(dataset: &Path, config_dir: Option<&Path>) -> Result<DashboardState> {
    let config = match config_dir {
        Some(dir) => DashboardConfig::load(dir)?,
        None => DashboardConfig::load_default()?,
    };
    logging::init_tracing(&config.log_level);

    let store = RecordStore::from_json_path(dataset)?.install()?;
    DashboardState::from_config(store, config)
}
