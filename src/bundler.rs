//! The environment-gated front end: run a full bundle cycle and render
//! its markup.
//!
//! A `Bundler` composes the configuration, the minification-enabled
//! flag (derived by the caller from its environment) and the request
//! headers to forward. It never reads ambient state; a web integration
//! passes the incoming request's headers in, a CLI passes defaults.

use crate::config::BundleConfig;
use crate::debug;
use crate::error::BundleError;
use crate::http::RequestHeaders;
use crate::markup::AttributeMap;
use crate::provider::{Kind, Provider};
use crate::scan::scan_asset_dir;

#[derive(Debug)]
pub struct Bundler<'a> {
    config: &'a BundleConfig,
    headers: RequestHeaders,
    minify_enabled: bool,
    provider: Option<Provider<'a>>,
    attributes: AttributeMap,
    build_path: String,
    full_url: bool,
    only_url: bool,
}

impl<'a> Bundler<'a> {
    pub fn new(config: &'a BundleConfig, minify_enabled: bool, headers: RequestHeaders) -> Self {
        Self {
            config,
            headers,
            minify_enabled,
            provider: None,
            attributes: AttributeMap::new(),
            build_path: String::new(),
            full_url: false,
            only_url: false,
        }
    }

    /// Bundle explicit JavaScript sources.
    pub fn javascript<S: AsRef<str>>(
        &mut self,
        files: &[S],
        attributes: AttributeMap,
    ) -> Result<&mut Self, BundleError> {
        self.cycle(Kind::JavaScript, files, attributes)
    }

    /// Bundle explicit stylesheet sources.
    pub fn stylesheet<S: AsRef<str>>(
        &mut self,
        files: &[S],
        attributes: AttributeMap,
    ) -> Result<&mut Self, BundleError> {
        self.cycle(Kind::StyleSheet, files, attributes)
    }

    /// Bundle every qualifying `.js` file under a directory.
    pub fn javascript_dir(
        &mut self,
        dir: &str,
        attributes: AttributeMap,
    ) -> Result<&mut Self, BundleError> {
        self.dir_cycle(Kind::JavaScript, dir, attributes)
    }

    /// Bundle every qualifying `.css` file under a directory.
    pub fn stylesheet_dir(
        &mut self,
        dir: &str,
        attributes: AttributeMap,
    ) -> Result<&mut Self, BundleError> {
        self.dir_cycle(Kind::StyleSheet, dir, attributes)
    }

    /// Prefix the configured base URL on the next render.
    pub fn with_full_url(&mut self) -> &mut Self {
        self.full_url = true;
        self
    }

    /// Make `render` return the bare artifact URL instead of markup.
    pub fn only_url(&mut self) -> &mut Self {
        self.only_url = true;
        self
    }

    /// Render the result of the last cycle: passthrough tags when
    /// minification is disabled, otherwise the built artifact's tag (or
    /// bare URL under `only_url`). Empty when the cycle had no sources.
    pub fn render(&self) -> String {
        let Some(provider) = &self.provider else {
            return String::new();
        };
        if provider.count() == 0 {
            return String::new();
        }

        let base_url = if self.full_url {
            self.config.base_url()
        } else {
            ""
        };

        if !self.minify_enabled {
            return provider.tags(base_url, &self.attributes);
        }

        let url = format!("{base_url}{}{}", self.build_path, provider.filename());
        if self.only_url {
            return url;
        }
        provider.tag(&url, &self.attributes)
    }

    fn build_path_for(&self, kind: Kind) -> &str {
        match kind {
            Kind::JavaScript => &self.config.js_build_path,
            Kind::StyleSheet => &self.config.css_build_path,
        }
    }

    fn cycle<S: AsRef<str>>(
        &mut self,
        kind: Kind,
        files: &[S],
        attributes: AttributeMap,
    ) -> Result<&mut Self, BundleError> {
        self.attributes = attributes;
        self.build_path = self.build_path_for(kind).to_string();

        let mut provider = Provider::new(kind, self.config, self.headers.clone());
        provider.add_all(files)?;

        if self.minify_enabled && provider.build(&self.build_path)? {
            provider.minify()?;
            debug!("bundle"; "built {}", provider.filename());
        }

        self.provider = Some(provider);
        // Full-url rendering is opted into per request
        self.full_url = false;
        Ok(self)
    }

    fn dir_cycle(
        &mut self,
        kind: Kind,
        dir: &str,
        attributes: AttributeMap,
    ) -> Result<&mut Self, BundleError> {
        let files = scan_asset_dir(
            &self.config.public_root,
            dir,
            kind.extension(),
            self.config.reverse_sort,
        );
        self.cycle(kind, &files, attributes)
    }
}
