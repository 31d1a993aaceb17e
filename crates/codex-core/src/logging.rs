//! Tracing subscriber initialization.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::logging::LoggingConfig;
use crate::error::AppError;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Fails when a
/// global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    result.map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))
}
