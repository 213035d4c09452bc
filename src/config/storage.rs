//! Storage configuration

use std::path::PathBuf;

use once_cell::sync::Lazy;
use serde::Deserialize;

use super::error::ValidationError;

/// Default conversation root under the user's home directory.
static DEFAULT_ROOT: Lazy<Option<PathBuf>> = Lazy::new(|| {
    dirs::home_dir().map(|home| home.join(".image-atelier").join("conversations"))
});

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// Conversation storage root. Defaults to
    /// `~/.image-atelier/conversations` when unset.
    pub root: Option<PathBuf>,

    /// Directory generated artifacts are saved to. Defaults to a
    /// sibling `artifacts` directory next to the conversation root.
    pub artifacts_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolves the conversation root directory.
    pub fn resolve_root(&self) -> Result<PathBuf, ValidationError> {
        self.root
            .clone()
            .or_else(|| DEFAULT_ROOT.clone())
            .ok_or(ValidationError::UnresolvableStorageRoot)
    }

    /// Resolves the artifacts directory.
    pub fn resolve_artifacts_dir(&self) -> Result<PathBuf, ValidationError> {
        if let Some(dir) = &self.artifacts_dir {
            return Ok(dir.clone());
        }
        let root = self.resolve_root()?;
        Ok(root
            .parent()
            .map(|parent| parent.join("artifacts"))
            .unwrap_or_else(|| root.join("artifacts")))
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.resolve_root()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_wins() {
        let config = StorageConfig {
            root: Some(PathBuf::from("/data/conversations")),
            artifacts_dir: None,
        };
        assert_eq!(
            config.resolve_root().unwrap(),
            PathBuf::from("/data/conversations")
        );
    }

    #[test]
    fn artifacts_default_to_a_sibling_directory() {
        let config = StorageConfig {
            root: Some(PathBuf::from("/data/conversations")),
            artifacts_dir: None,
        };
        assert_eq!(
            config.resolve_artifacts_dir().unwrap(),
            PathBuf::from("/data/artifacts")
        );
    }

    #[test]
    fn explicit_artifacts_dir_wins() {
        let config = StorageConfig {
            root: None,
            artifacts_dir: Some(PathBuf::from("/exports")),
        };
        assert_eq!(
            config.resolve_artifacts_dir().unwrap(),
            PathBuf::from("/exports")
        );
    }
}
