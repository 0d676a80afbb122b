//! Stylesheet `url(...)` rewriting.
//!
//! When stylesheet content is relocated into the combined artifact's
//! directory, relative references would break. Every `url(...)` match is
//! rewritten by prefixing the inner reference with the source file's
//! containing directory relative to the public root.
//!
//! The prefixing is uniform: absolute URLs and data-URIs are not
//! detected and get the same treatment as relative paths. That matches
//! the historical behavior this engine replaces and is a known
//! limitation, not something to fix silently.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Rewrite every `url(...)` reference in `content` by prefixing `folder`
/// (the source's containing directory, trailing slash included).
///
/// Handles optionally quoted references with optional interior
/// whitespace, case-insensitively. Quote style is preserved.
pub fn rewrite_urls(content: &str, folder: &str) -> String {
    static RE_URL: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(?i)url\(\s*(["']?)\s*([^"')]*?)\s*(["']?)\s*\)"#).unwrap()
    });

    if folder.is_empty() {
        return content.to_string();
    }

    RE_URL
        .replace_all(content, |caps: &Captures| {
            let open = &caps[1];
            let inner = &caps[2];
            let close = &caps[3];
            format!("url({open}{folder}{inner}{close})")
        })
        .into_owned()
}
