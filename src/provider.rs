//! Provider composition: one asset kind's add / build-or-skip / minify /
//! tag cycle.
//!
//! A provider owns its source set for one build cycle:
//! add sources, then `build` answers whether a fresh artifact already
//! exists (skip) or the sources were aggregated (minify next), then
//! `minify` persists the artifact. Rendering consumes the result.
//!
//! Kind-specific behavior (extension, minifier, tag shape, url
//! rewriting) hangs off [`Kind`] rather than inheritance.

use std::path::{Path, PathBuf};

use crate::aggregate;
use crate::config::BundleConfig;
use crate::error::BundleError;
use crate::fingerprint::{Fingerprint, fingerprint};
use crate::freshness::freshness;
use crate::http::RequestHeaders;
use crate::log;
use crate::markup::{AttributeMap, link_tag, passthrough_tags, script_tag};
use crate::minify::{MinifierFn, minify_css, minify_js};
use crate::source::SourceReference;
use crate::store;

// ============================================================================
// Kind
// ============================================================================

/// The asset kinds this engine builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    JavaScript,
    StyleSheet,
}

impl Kind {
    /// Artifact filename extension.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::StyleSheet => "css",
        }
    }

    /// The default minifier for this kind.
    pub const fn minifier(self) -> MinifierFn {
        match self {
            Self::JavaScript => minify_js,
            Self::StyleSheet => minify_css,
        }
    }

    /// Whether local sources get `url(...)` rewriting before
    /// concatenation.
    pub const fn rewrites_urls(self) -> bool {
        matches!(self, Self::StyleSheet)
    }

    /// Render one element referencing `url`.
    pub fn tag(self, url: &str, attributes: &AttributeMap) -> String {
        match self {
            Self::JavaScript => script_tag(url, attributes),
            Self::StyleSheet => link_tag(url, attributes),
        }
    }
}

// ============================================================================
// Provider
// ============================================================================

/// One asset kind's build cycle over an ordered source set.
#[derive(Debug)]
pub struct Provider<'a> {
    kind: Kind,
    config: &'a BundleConfig,
    headers: RequestHeaders,
    minifier: MinifierFn,
    sources: Vec<SourceReference>,
    aggregated: String,
    filename: String,
    output_dir: PathBuf,
    cleanup: Option<BundleError>,
}

impl<'a> Provider<'a> {
    pub fn new(kind: Kind, config: &'a BundleConfig, headers: RequestHeaders) -> Self {
        Self {
            kind,
            config,
            headers,
            minifier: kind.minifier(),
            sources: Vec::new(),
            aggregated: String::new(),
            filename: String::new(),
            output_dir: PathBuf::new(),
            cleanup: None,
        }
    }

    /// Replace the default minifier. The replacement must be
    /// deterministic for concurrent same-key builds to stay benign.
    pub fn with_minifier(mut self, minifier: MinifierFn) -> Self {
        self.minifier = minifier;
        self
    }

    pub const fn kind(&self) -> Kind {
        self.kind
    }

    /// Number of sources added so far.
    pub fn count(&self) -> usize {
        self.sources.len()
    }

    /// The combined (pre-minification) text of the last build.
    pub fn aggregated(&self) -> &str {
        &self.aggregated
    }

    /// The artifact key computed by the last build.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Cleanup failure from the last build, if any. Purge failures do
    /// not block writing the new artifact but stay inspectable here.
    pub const fn cleanup_error(&self) -> Option<&BundleError> {
        self.cleanup.as_ref()
    }

    /// Add one source reference. Local paths resolve against the public
    /// root and must exist (fail-fast).
    pub fn add(&mut self, raw: &str) -> Result<&mut Self, BundleError> {
        let source = SourceReference::resolve(raw, &self.config.public_root)?;
        self.sources.push(source);
        Ok(self)
    }

    /// Add several source references in order.
    pub fn add_all<S: AsRef<str>>(&mut self, raws: &[S]) -> Result<&mut Self, BundleError> {
        for raw in raws {
            self.add(raw.as_ref())?;
        }
        Ok(self)
    }

    /// Build or skip.
    ///
    /// Computes the artifact key, ensures the output directory, and
    /// returns `Ok(false)` iff an artifact with that key already exists
    /// (skip minification). Otherwise purges superseded artifacts
    /// sharing the fingerprint prefix, aggregates the sources, and
    /// returns `Ok(true)`, after which the caller should invoke [`minify`] next.
    ///
    /// [`minify`]: Provider::minify
    pub fn build(&mut self, build_path: &str) -> Result<bool, BundleError> {
        self.output_dir = self
            .config
            .public_root
            .join(build_path.trim_start_matches('/'));
        store::ensure_writable_dir(&self.output_dir)?;

        let fp = self.fingerprint();
        self.filename = self.artifact_key(&fp)?;

        if store::exists(&self.output_dir, &self.filename) {
            return Ok(false);
        }

        // Purge failures are reported but do not block the new write
        self.cleanup = None;
        if let Err(err) = store::purge_superseded(&self.output_dir, &fp) {
            log!("warning"; "{err}");
            self.cleanup = Some(err);
        }

        self.aggregated =
            aggregate::aggregate(self.kind, &self.sources, self.config, &self.headers)?;
        Ok(true)
    }

    /// Minify the aggregated text and persist the artifact.
    ///
    /// Returns the artifact key, also available via [`filename`].
    ///
    /// [`filename`]: Provider::filename
    pub fn minify(&mut self) -> Result<&str, BundleError> {
        let minified = (self.minifier)(&self.aggregated)?;
        store::write(&self.output_dir, &self.filename, &minified)?;
        Ok(&self.filename)
    }

    /// Render the element for the built artifact.
    pub fn tag(&self, url: &str, attributes: &AttributeMap) -> String {
        self.kind.tag(url, attributes)
    }

    /// Render one element per original source (passthrough mode).
    pub fn tags(&self, base_url: &str, attributes: &AttributeMap) -> String {
        let tag = match self.kind {
            Kind::JavaScript => script_tag,
            Kind::StyleSheet => link_tag,
        };
        passthrough_tags(tag, base_url, &self.sources, attributes)
    }

    pub fn sources(&self) -> &[SourceReference] {
        &self.sources
    }

    fn fingerprint(&self) -> Fingerprint {
        let ids: Vec<&str> = self.sources.iter().map(SourceReference::identifier).collect();
        fingerprint(&ids, &self.config.hash_salt)
    }

    /// `{fingerprintHex}{freshnessDecimalOrEmpty}.{ext}`
    fn artifact_key(&self, fp: &Fingerprint) -> Result<String, BundleError> {
        let suffix = if self.config.disable_mtime {
            String::new()
        } else {
            freshness(&self.sources, &self.headers.user_agent)?.to_string()
        };
        Ok(format!("{}{}.{}", fp.to_hex(), suffix, self.kind.extension()))
    }

    /// Resolved output directory of the last build.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
