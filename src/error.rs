//! Error types for the bundle pipeline.
//!
//! Nothing here is retried: every error is surfaced synchronously to the
//! caller of the operation that triggered it, and no tag referencing a
//! possibly-corrupt artifact is ever emitted after a failed build.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by the aggregation/caching pipeline.
#[derive(Debug, Error)]
pub enum BundleError {
    /// A local source is absent, either at add time or when its
    /// modification time is read during the staleness check.
    #[error("source file `{path}` does not exist")]
    SourceMissing { path: PathBuf },

    /// A remote source answered with a non-2xx status, or the transport
    /// failed (connection error, timeout, exhausted redirects).
    #[error("remote source `{url}` could not be fetched: {detail}")]
    RemoteFetch { url: String, detail: String },

    /// The output directory cannot be created or is not writable.
    #[error("build path `{dir}` is unavailable: {detail}")]
    DirectoryUnavailable { dir: PathBuf, detail: String },

    /// One or more superseded artifacts could not be removed. Deletion
    /// continues past individual failures; this lists everything left
    /// behind. Does not block writing the new artifact.
    #[error("superseded artifacts could not be removed: {failed:?}")]
    ArtifactCleanup { failed: Vec<PathBuf> },

    /// Persisting the minified artifact failed.
    #[error("artifact `{path}` cannot be saved")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The minifier rejected the aggregated text.
    #[error("minification failed: {detail}")]
    Minification { detail: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BundleError {
    /// Shorthand for a fetch failure naming the URL.
    pub fn remote_fetch(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::RemoteFetch {
            url: url.into(),
            detail: detail.into(),
        }
    }

    /// Shorthand for an unusable output directory.
    pub fn directory_unavailable(dir: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::DirectoryUnavailable {
            dir: dir.into(),
            detail: detail.into(),
        }
    }
}
