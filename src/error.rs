//! Unified dashboard error types
//!
//! Provides a single error type for the crate, serializable so the
//! presentation layer can show it without knowing the variants.
//!
//! Recoverable data conditions (unknown countries, empty filter results,
//! zero tourist counts) are not errors and never show up here.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Dashboard-level error type
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Date range whose start is after its end
    #[error("invalid month range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Loaded record violating a data invariant
    #[error("invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// Configuration could not be read or failed validation
    #[error("configuration error: {0}")]
    Config(String),

    /// File operation error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The process-wide record store was installed twice
    #[error("record store already initialized")]
    StoreAlreadyInitialized,

    /// The process-wide record store was read before being installed
    #[error("record store not initialized")]
    StoreNotInitialized,
}

/// Serializable error response for the presentation layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl DashboardError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::InvalidRecord { .. } => "INVALID_RECORD",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Yaml(_) => "YAML_ERROR",
            Self::StoreAlreadyInitialized => "STORE_ALREADY_INITIALIZED",
            Self::StoreNotInitialized => "STORE_NOT_INITIALIZED",
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<&DashboardError> for ErrorResponse {
    fn from(err: &DashboardError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DashboardError> for ErrorResponse {
    fn from(err: DashboardError) -> Self {
        Self::from(&err)
    }
}

impl Serialize for DashboardError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ErrorResponse::from(self).serialize(serializer)
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DashboardError>;
