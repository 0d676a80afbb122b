//! Bundle configuration, loaded from `assetpack.toml`.
//!
//! The engine consumes the configuration; it never reads ambient state.
//! Request headers and the current environment are passed in explicitly
//! at call time.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_public_root() -> PathBuf {
    PathBuf::from("public")
}

/// Root configuration structure representing assetpack.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Directory all local source references and build paths resolve
    /// against. Relative values resolve against the config file's parent.
    #[serde(default = "default_public_root")]
    pub public_root: PathBuf,

    /// Salt mixed into every fingerprint; changing it invalidates all
    /// cached artifacts at once.
    #[serde(default)]
    pub hash_salt: String,

    /// Skip the staleness oracle entirely: artifact keys omit the
    /// freshness suffix and rebuilds happen only on fingerprint change.
    #[serde(default)]
    pub disable_mtime: bool,

    /// Leave `url(...)` references in stylesheet sources untouched.
    #[serde(default)]
    pub disable_url_correction: bool,

    /// Output directory for combined JavaScript artifacts, relative to
    /// the public root. Include a trailing slash; it is concatenated
    /// verbatim into rendered URLs.
    #[serde(default)]
    pub js_build_path: String,

    /// Output directory for combined stylesheet artifacts. Same rules as
    /// `js_build_path`.
    #[serde(default)]
    pub css_build_path: String,

    /// Environments in which minification is disabled and passthrough
    /// tags are rendered instead (typically `["local", "testing"]`).
    pub ignore_environments: Option<Vec<String>>,

    /// Absolute URL prefix used by `with_full_url` rendering.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Sort directory scans descending instead of ascending.
    #[serde(default)]
    pub reverse_sort: bool,

    /// Per-request timeout for remote source fetches, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            public_root: default_public_root(),
            hash_salt: String::new(),
            disable_mtime: false,
            disable_url_correction: false,
            js_build_path: "js/min/".to_string(),
            css_build_path: "css/min/".to_string(),
            ignore_environments: Some(Vec::new()),
            base_url: None,
            reverse_sort: false,
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl BundleConfig {
    /// Load and validate a config file, resolving `public_root` against
    /// the file's parent directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Io(path.into(), err))?;
        let mut config: Self = toml::from_str(&raw)?;

        if config.public_root.is_relative()
            && let Some(parent) = path.parent()
        {
            config.public_root = parent.join(&config.public_root);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the essential fields are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.css_build_path.is_empty() {
            return Err(ConfigError::Validation(
                "missing css_build_path field".to_string(),
            ));
        }
        if self.js_build_path.is_empty() {
            return Err(ConfigError::Validation(
                "missing js_build_path field".to_string(),
            ));
        }
        if self.ignore_environments.is_none() {
            return Err(ConfigError::Validation(
                "missing ignore_environments field".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether sources should be minified for the given environment.
    pub fn minify_for(&self, environment: &str) -> bool {
        !self
            .ignore_environments
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|ignored| ignored == environment)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or_default()
    }

    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
