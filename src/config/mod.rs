//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `IMAGE_ATELIER` prefix and nested values use double underscores as
//! separators (e.g. `IMAGE_ATELIER__IMAGES__API_KEY`).
//!
//! # Example
//!
//! ```no_run
//! use image_atelier::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod images;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use images::ImagesConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Conversation and artifact storage locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Image generation service settings
    #[serde(default)]
    pub images: ImagesConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("IMAGE_ATELIER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.images.validate()?;
        Ok(())
    }
}
