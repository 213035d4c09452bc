//! Filesystem artifact sink.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::ports::{ArtifactError, ArtifactSink};

/// Saves generated bytes under a fixed directory with timestamped,
/// collision-free filenames (`image_<yyyymmdd_hhmmss>_<8 hex>.<ext>`).
#[derive(Debug, Clone)]
pub struct FsArtifactSink {
    dir: PathBuf,
}

impl FsArtifactSink {
    /// Creates a sink writing into `dir`. The directory is created on
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for FsArtifactSink {
    fn save(&self, bytes: &[u8], extension: &str) -> Result<PathBuf, ArtifactError> {
        fs::create_dir_all(&self.dir)?;

        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let suffix = &Uuid::new_v4().simple().to_string()[..8];
        let path = self
            .dir
            .join(format!("image_{}_{}.{}", stamp, suffix, extension));

        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Saved artifact");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_bytes_under_the_directory() {
        let dir = TempDir::new().unwrap();
        let sink = FsArtifactSink::new(dir.path());

        let path = sink.save(b"png-bytes", "png").unwrap();
        assert!(path.starts_with(dir.path()));
        assert_eq!(fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn filenames_are_unique_per_save() {
        let dir = TempDir::new().unwrap();
        let sink = FsArtifactSink::new(dir.path());

        let a = sink.save(b"a", "png").unwrap();
        let b = sink.save(b"b", "png").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn filename_follows_the_image_pattern() {
        let dir = TempDir::new().unwrap();
        let sink = FsArtifactSink::new(dir.path());

        let path = sink.save(b"a", "png").unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("image_"));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = FsArtifactSink::new(&nested);

        let path = sink.save(b"a", "png").unwrap();
        assert!(path.exists());
    }
}
