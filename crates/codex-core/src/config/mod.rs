//! Application configuration schemas.
//!
//! The configuration is deserialized from TOML files via the `config`
//! crate and checked with `validator` before use.

pub mod app;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::app::AppSection;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (default.toml + environment overlay) and `CODEX__*` variables.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Application identity.
    #[validate(nested)]
    pub app: AppSection,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the `config/` directory.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from(Path::new("config"), env)
    }

    /// Load configuration from TOML files in `dir`.
    ///
    /// Merges `default.toml` with an environment-specific overlay and
    /// environment variables prefixed with `CODEX__`.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, AppError> {
        let default_path = dir.join("default");
        let env_path = dir.join(env);

        let config = config::Config::builder()
            .add_source(
                config::File::with_name(&default_path.to_string_lossy()).required(false),
            )
            .add_source(config::File::with_name(&env_path.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("CODEX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;

        Ok(config)
    }
}
