//! Default minifier implementations for JS and CSS.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Both are pluggable
//! through the [`MinifierFn`] seam; the cache-skip race documented in
//! the concurrency model is only benign because these functions are
//! deterministic, and a replacement minifier must be too.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::error::BundleError;

/// A minifier: deterministic and total over its input. Internal errors
/// surface as [`BundleError::Minification`].
pub type MinifierFn = fn(&str) -> Result<String, BundleError>;

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Result<String, BundleError> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        let detail = ret
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(BundleError::Minification { detail });
    }

    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, BundleError> {
    let stylesheet =
        StyleSheet::parse(source, ParserOptions::default()).map_err(|err| {
            BundleError::Minification {
                detail: err.to_string(),
            }
        })?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|err| BundleError::Minification {
            detail: err.to_string(),
        })?;
    Ok(result.code)
}
