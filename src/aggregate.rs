//! Source aggregation: resolve every source to text and concatenate in
//! input order, each source followed by a newline separator.
//!
//! A failed source aborts the entire aggregation; nothing is skipped
//! silently, and no artifact is written from a partial result.

use std::fs;

use crate::config::BundleConfig;
use crate::css;
use crate::error::BundleError;
use crate::http::{self, RequestHeaders};
use crate::provider::Kind;
use crate::source::SourceReference;

/// Build the combined text for an ordered source set.
///
/// Local sources are read from disk; remote sources are fetched with the
/// forwarded header set, strictly in order. For the stylesheet kind,
/// each local source's `url(...)` references are rewritten against its
/// containing directory before concatenation (unless
/// `disable_url_correction` is set).
pub fn aggregate(
    kind: Kind,
    sources: &[SourceReference],
    config: &BundleConfig,
    headers: &RequestHeaders,
) -> Result<String, BundleError> {
    let mut combined = String::new();

    for source in sources {
        let text = match source {
            SourceReference::Remote { url } => {
                http::fetch(url, headers, config.fetch_timeout())?
            }
            SourceReference::Local { path, .. } => {
                let text = fs::read_to_string(path)
                    .map_err(|_| BundleError::SourceMissing { path: path.clone() })?;
                if kind.rewrites_urls() && !config.disable_url_correction {
                    css::rewrite_urls(&text, source.folder())
                } else {
                    text
                }
            }
        };

        combined.push_str(&text);
        combined.push('\n');
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> BundleConfig {
        BundleConfig {
            public_root: root.to_path_buf(),
            ..BundleConfig::default()
        }
    }

    fn local(root: &Path, id: &str, content: &str) -> SourceReference {
        let path = root.join(id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        SourceReference::Local {
            id: id.to_string(),
            path,
        }
    }

    #[test]
    fn test_concatenation_order_and_separators() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());
        let sources = vec![
            local(dir.path(), "a.js", "AAA"),
            local(dir.path(), "b.js", "BBB"),
            local(dir.path(), "c.js", "CCC"),
        ];

        let combined = aggregate(
            Kind::JavaScript,
            &sources,
            &config,
            &RequestHeaders::default(),
        )
        .unwrap();
        assert_eq!(combined, "AAA\nBBB\nCCC\n");
    }

    #[test]
    fn test_duplicates_concatenated_twice() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());
        let source = local(dir.path(), "a.js", "X");
        let sources = vec![source.clone(), source];

        let combined = aggregate(
            Kind::JavaScript,
            &sources,
            &config,
            &RequestHeaders::default(),
        )
        .unwrap();
        assert_eq!(combined, "X\nX\n");
    }

    #[test]
    fn test_stylesheet_rewrites_local_urls() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());
        let sources = vec![local(
            dir.path(),
            "css/sub/style.css",
            "body { background: url(images/x.png); }",
        )];

        let combined = aggregate(
            Kind::StyleSheet,
            &sources,
            &config,
            &RequestHeaders::default(),
        )
        .unwrap();
        assert_eq!(combined, "body { background: url(css/sub/images/x.png); }\n");
    }

    #[test]
    fn test_stylesheet_rewrite_disabled() {
        let dir = TempDir::new().unwrap();
        let config = BundleConfig {
            disable_url_correction: true,
            ..config_for(dir.path())
        };
        let sources = vec![local(
            dir.path(),
            "css/sub/style.css",
            "body { background: url(images/x.png); }",
        )];

        let combined = aggregate(
            Kind::StyleSheet,
            &sources,
            &config,
            &RequestHeaders::default(),
        )
        .unwrap();
        assert_eq!(combined, "body { background: url(images/x.png); }\n");
    }

    #[test]
    fn test_javascript_never_rewrites() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());
        let sources = vec![local(dir.path(), "js/app.js", "var u = 'url(x.png)';")];

        let combined = aggregate(
            Kind::JavaScript,
            &sources,
            &config,
            &RequestHeaders::default(),
        )
        .unwrap();
        assert_eq!(combined, "var u = 'url(x.png)';\n");
    }

    #[test]
    fn test_remote_failure_aborts_whole_build() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());
        let sources = vec![
            local(dir.path(), "a.js", "A"),
            SourceReference::Remote {
                // Nothing listens here
                url: "http://127.0.0.1:1/lib.js".to_string(),
            },
        ];

        let err = aggregate(
            Kind::JavaScript,
            &sources,
            &config,
            &RequestHeaders::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BundleError::RemoteFetch { .. }));
    }
}
