//! Image generator port - Interface to the image generation service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::enrichment::ImageSize;

/// Errors from the generation service.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Rate limited by the image service")]
    RateLimited,

    #[error("Image service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response from the image service: {0}")]
    InvalidResponse(String),

    #[error("Image service API key is not configured")]
    MissingApiKey,
}

/// Port for image generation.
///
/// The contract is deliberately opaque: a prompt and a size go in,
/// bytes or a failure come out. Retry and timeout behavior belong to
/// the implementation, not to the callers.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates one image for the prompt at the requested size.
    async fn generate(&self, prompt: &str, size: ImageSize) -> Result<Vec<u8>, GenerationError>;
}
