//! Image generation service configuration

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

/// Image generation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    /// API key for the image service. Optional so store-only usage
    /// loads without credentials; resolving a client requires it.
    pub api_key: Option<String>,

    /// Image model to use
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on rate limiting
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl ImagesConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Returns the API key, or an error if it is not configured.
    ///
    /// Deferred to client construction so that store-only usage never
    /// needs credentials.
    pub fn require_api_key(&self) -> Result<&str, ValidationError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ValidationError::MissingRequired(
                "IMAGE_ATELIER__IMAGES__API_KEY",
            ))
    }

    /// Validate image service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    "gpt-image-1".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_retries() -> u32 {
    3
}
