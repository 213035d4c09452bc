//! OpenAI Images client - Implementation of `ImageGenerator`.
//!
//! Calls the Images API's generations endpoint and decodes the
//! base64-encoded payload the image model returns. Rate-limited
//! requests are retried with exponential backoff up to a bounded
//! number of attempts; no further resilience is attempted here.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::domain::enrichment::ImageSize;
use crate::ports::{GenerationError, ImageGenerator};

/// Configuration for the OpenAI Images client.
#[derive(Debug, Clone)]
pub struct OpenAiImagesConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Image model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on rate limiting.
    pub max_retries: u32,
}

impl OpenAiImagesConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-image-1".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(120),
            max_retries: 3,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Images API client.
pub struct OpenAiImages {
    config: OpenAiImagesConfig,
    client: Client,
}

impl OpenAiImages {
    /// Creates a new client with the given configuration.
    pub fn new(config: OpenAiImagesConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.config.base_url)
    }

    async fn request_once(
        &self,
        payload: &GenerationsRequest<'_>,
    ) -> Result<GenerationsResponse, GenerationError> {
        let response = self
            .client
            .post(self.generations_url())
            .bearer_auth(self.config.api_key())
            .json(payload)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerationsResponse>()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImages {
    async fn generate(&self, prompt: &str, size: ImageSize) -> Result<Vec<u8>, GenerationError> {
        let payload = GenerationsRequest {
            model: &self.config.model,
            prompt,
            size: size.api_value(),
            n: 1,
        };

        tracing::debug!(model = %self.config.model, size = %size, "Requesting image generation");

        let mut attempt = 0;
        let response = loop {
            match self.request_once(&payload).await {
                Ok(response) => break response,
                Err(GenerationError::RateLimited) if attempt + 1 < self.config.max_retries => {
                    let backoff = Duration::from_secs(1 << attempt);
                    tracing::info!(attempt, "Rate limited, backing off for {:?}", backoff);
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        let first = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::InvalidResponse("empty data array".to_string()))?;

        // The image model returns base64 payloads, not URLs.
        let b64 = first.b64_json.ok_or_else(|| {
            GenerationError::InvalidResponse("missing b64_json payload".to_string())
        })?;

        base64::engine::general_purpose::STANDARD
            .decode(b64.as_bytes())
            .map_err(|e| GenerationError::InvalidResponse(format!("invalid base64: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct GenerationsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u8,
}

#[derive(Debug, Deserialize)]
struct GenerationsResponse {
    #[serde(default)]
    data: Vec<GeneratedDatum>,
}

#[derive(Debug, Deserialize)]
struct GeneratedDatum {
    b64_json: Option<String>,
    #[allow(dead_code)]
    revised_prompt: Option<String>,
}
