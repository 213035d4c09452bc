//! Artifact sink port - Byte sink for generated images.

use std::path::PathBuf;

use thiserror::Error;

/// Errors while persisting artifact bytes.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for saving generated artifact bytes to a location chosen by
/// the implementation's owner.
pub trait ArtifactSink: Send + Sync {
    /// Persists the bytes and returns the path they were written to.
    ///
    /// `extension` is the file extension without the leading dot
    /// (e.g. "png").
    fn save(&self, bytes: &[u8], extension: &str) -> Result<PathBuf, ArtifactError>;
}
