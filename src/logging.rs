//! Tracing subscriber setup

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a formatted stderr subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Returns `false` when a
/// global subscriber was already installed.
pub fn init_tracing(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
