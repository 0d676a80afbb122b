//! assetpack - build-time asset aggregation and caching.
//!
//! Combines an ordered set of JavaScript or CSS sources (local files or
//! remote URLs) into a single minified artifact named by a content-
//! derived fingerprint, reuses that artifact until any input changes,
//! and emits the HTML markup referencing it.

pub mod aggregate;
pub mod bundler;
pub mod cli;
pub mod config;
pub mod css;
pub mod error;
pub mod fingerprint;
pub mod freshness;
pub mod http;
pub mod logger;
pub mod markup;
pub mod minify;
pub mod provider;
pub mod scan;
pub mod source;
pub mod store;

pub use bundler::Bundler;
pub use config::{BundleConfig, ConfigError};
pub use error::BundleError;
pub use fingerprint::{Fingerprint, fingerprint};
pub use http::RequestHeaders;
pub use markup::{AttrValue, AttributeMap};
pub use minify::{MinifierFn, minify_css, minify_js};
pub use provider::{Kind, Provider};
pub use source::SourceReference;
