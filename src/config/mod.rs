//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HEALTHTRACK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use healthtrack::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Storing records in {}", config.storage.data_dir.display());
//! ```

mod error;
mod features;
mod logging;
mod session;
mod storage;
mod wizard;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::{LogFormat, LoggingConfig};
pub use session::SessionConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use wizard::{WizardConfig, MAX_DELAY_MS};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Record storage (backend, directory, quota)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Wizard timing and autosave
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Session expiry
    #[serde(default)]
    pub session: SessionConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HEALTHTRACK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HEALTHTRACK__STORAGE__DATA_DIR=/var/lib/healthtrack` -> `storage.data_dir`
    /// - `HEALTHTRACK__SESSION__MAX_AGE_SECS=3600` -> `session.max_age_secs`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HEALTHTRACK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.wizard.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
