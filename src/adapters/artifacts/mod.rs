//! Artifact persistence.

mod fs_sink;

pub use fs_sink::FsArtifactSink;
