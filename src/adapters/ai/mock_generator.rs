//! Mock image generator for tests and offline development.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::enrichment::ImageSize;
use crate::ports::{GenerationError, ImageGenerator};

/// In-memory generator that returns fixed bytes and records every
/// request it receives.
pub struct MockImageGenerator {
    bytes: Vec<u8>,
    fail_with: Option<GenerationError>,
    requests: Mutex<Vec<(String, ImageSize)>>,
}

impl MockImageGenerator {
    /// Creates a generator that succeeds with the given bytes.
    pub fn returning(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            fail_with: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a generator that always fails with the given error.
    pub fn failing(error: GenerationError) -> Self {
        Self {
            bytes: Vec::new(),
            fail_with: Some(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the prompts and sizes requested so far.
    pub fn requests(&self) -> Vec<(String, ImageSize)> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::returning(b"png-bytes".to_vec())
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, prompt: &str, size: ImageSize) -> Result<Vec<u8>, GenerationError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((prompt.to_string(), size));

        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(self.bytes.clone()),
        }
    }
}
