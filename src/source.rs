//! Source references: local files under the public root, or remote URLs.
//!
//! Ordering among the sources of a build is significant and preserved:
//! it affects both the fingerprint and the concatenation order.
//! Duplicates are allowed and will be concatenated twice.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::BundleError;

/// A single asset source, immutable once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceReference {
    /// A file under the public root. `id` is the public-root-relative
    /// string as added; `path` is the resolved absolute location,
    /// existence-checked at add time.
    Local { id: String, path: PathBuf },

    /// A remote resource, kept verbatim as added. Scheme-relative
    /// `//host/...` forms are normalized to `http://` at fetch time.
    Remote { url: String },
}

/// Check whether a raw reference names a remote resource.
pub fn is_remote(raw: &str) -> bool {
    static RE_REMOTE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(https?:)?//").unwrap());
    RE_REMOTE.is_match(raw)
}

/// Prefix scheme-relative URLs with `http:`.
pub fn normalize_scheme(url: &str) -> String {
    if url.starts_with("//") {
        format!("http:{url}")
    } else {
        url.to_string()
    }
}

impl SourceReference {
    /// Resolve a raw reference string against the public root.
    ///
    /// Local references are existence-checked immediately (fail-fast, not
    /// deferred to aggregation time).
    pub fn resolve(raw: &str, public_root: &Path) -> Result<Self, BundleError> {
        if is_remote(raw) {
            return Ok(Self::Remote {
                url: raw.to_string(),
            });
        }

        let path = public_root.join(raw.trim_start_matches('/'));
        if !path.is_file() {
            return Err(BundleError::SourceMissing { path });
        }

        Ok(Self::Local {
            id: raw.to_string(),
            path,
        })
    }

    /// The identifier string this source contributes to the fingerprint
    /// and to passthrough URLs: the relative path for local sources, the
    /// raw URL for remote ones.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Local { id, .. } => id,
            Self::Remote { url } => url,
        }
    }

    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// The identifier's containing directory, trailing slash included
    /// (empty for top-level sources). Used to relocate `url(...)`
    /// references when stylesheet content moves into the combined output.
    pub fn folder(&self) -> &str {
        let id = self.identifier();
        match id.rfind('/') {
            Some(pos) => &id[..=pos],
            None => "",
        }
    }
}
