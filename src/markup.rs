//! HTML markup emission: attribute maps and script/link tags.
//!
//! Attribute order is insertion order, with fixed required attributes
//! injected first. `set` replaces an existing key's value in place, so a
//! caller can override an injected attribute's value without disturbing
//! its position.

use std::borrow::Cow;

use crate::source::SourceReference;

// ============================================================================
// Attribute values
// ============================================================================

/// An attribute value: text, a boolean flag, or explicit absence.
///
/// `Bool(true)` renders as a bare attribute name, `Bool(false)` and
/// `Null` render nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Bool(bool),
    Null,
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// ============================================================================
// Attribute map
// ============================================================================

/// Insertion-ordered attribute collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute. An existing key keeps its position and gets the
    /// new value; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Append a bare flag attribute (`async`, `defer`, ...), the
    /// positional form where the name is the whole attribute.
    pub fn flag(&mut self, name: impl Into<String>) -> &mut Self {
        self.set(name, true)
    }

    /// Merge another map in, entry by entry, with `set` semantics.
    pub fn merge(&mut self, other: &AttributeMap) -> &mut Self {
        for (key, value) in &other.entries {
            self.set(key.clone(), value.clone());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to `key="value" flag ...` form. Escapes text values;
    /// skips `Bool(false)` and `Null` entries entirely.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                AttrValue::Bool(true) => parts.push(key.clone()),
                AttrValue::Bool(false) | AttrValue::Null => {}
                AttrValue::Text(text) => {
                    parts.push(format!("{key}=\"{}\"", escape_attr(text)));
                }
            }
        }
        parts.join(" ")
    }
}

// ============================================================================
// Escaping
// ============================================================================

/// Characters that require escaping inside attribute values.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML special characters in an attribute value.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

// ============================================================================
// Tags
// ============================================================================

/// Render a `<script>` element. `src` goes first; caller attributes can
/// override its value but not its position. A fixed
/// `crossorigin="anonymous"` is always appended.
pub fn script_tag(url: &str, attributes: &AttributeMap) -> String {
    let mut map = AttributeMap::new();
    map.set("src", url);
    map.merge(attributes);
    format!(
        "<script {} crossorigin=\"anonymous\"></script>\n",
        map.render()
    )
}

/// Render a `<link>` element. `href` and `rel="stylesheet"` go first;
/// callers can override `rel`'s value but not reorder precedence.
pub fn link_tag(url: &str, attributes: &AttributeMap) -> String {
    let mut map = AttributeMap::new();
    map.set("href", url);
    map.set("rel", "stylesheet");
    map.merge(attributes);
    format!("<link {}>\n", map.render())
}

/// Render one tag per original source (passthrough mode), each URL being
/// `base_url` + the source's identifier.
pub fn passthrough_tags(
    tag: fn(&str, &AttributeMap) -> String,
    base_url: &str,
    sources: &[SourceReference],
    attributes: &AttributeMap,
) -> String {
    sources
        .iter()
        .map(|source| tag(&format!("{base_url}{}", source.identifier()), attributes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_rendering_mixed_values() {
        let mut map = AttributeMap::new();
        map.set("src", "a.js");
        map.set("async", true);
        map.set("defer", false);
        map.set("title", AttrValue::Null);
        assert_eq!(map.render(), "src=\"a.js\" async");
    }

    #[test]
    fn test_flag_attribute() {
        let mut map = AttributeMap::new();
        map.flag("defer");
        assert_eq!(map.render(), "defer");
    }

    #[test]
    fn test_value_escaping() {
        let mut map = AttributeMap::new();
        map.set("title", "say \"hi\" & <go>");
        assert_eq!(
            map.render(),
            "title=\"say &quot;hi&quot; &amp; &lt;go&gt;\""
        );
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut map = AttributeMap::new();
        map.set("src", "first.js");
        map.set("id", "main");
        map.set("src", "second.js");
        assert_eq!(map.render(), "src=\"second.js\" id=\"main\"");
    }

    #[test]
    fn test_script_tag() {
        let tag = script_tag("/js/min/abc.js", &AttributeMap::new());
        assert_eq!(
            tag,
            "<script src=\"/js/min/abc.js\" crossorigin=\"anonymous\"></script>\n"
        );
    }

    #[test]
    fn test_script_tag_caller_overrides_src_value_not_position() {
        let mut attrs = AttributeMap::new();
        attrs.set("src", "override.js");
        attrs.set("defer", true);
        let tag = script_tag("built.js", &attrs);
        assert_eq!(
            tag,
            "<script src=\"override.js\" defer crossorigin=\"anonymous\"></script>\n"
        );
    }

    #[test]
    fn test_link_tag() {
        let tag = link_tag("/css/min/abc.css", &AttributeMap::new());
        assert_eq!(
            tag,
            "<link href=\"/css/min/abc.css\" rel=\"stylesheet\">\n"
        );
    }

    #[test]
    fn test_link_tag_rel_override() {
        let mut attrs = AttributeMap::new();
        attrs.set("rel", "preload");
        let tag = link_tag("a.css", &attrs);
        assert_eq!(tag, "<link href=\"a.css\" rel=\"preload\">\n");
    }

    #[test]
    fn test_passthrough_tags() {
        let sources = vec![
            SourceReference::Local {
                id: "js/a.js".to_string(),
                path: "/tmp/a.js".into(),
            },
            SourceReference::Remote {
                url: "http://cdn.test/b.js".to_string(),
            },
        ];
        let html = passthrough_tags(script_tag, "/", &sources, &AttributeMap::new());
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("src=\"/js/a.js\""));
        // Uniform concatenation: the base URL is prefixed to remote
        // identifiers too
        assert!(lines[1].contains("src=\"/http://cdn.test/b.js\""));
    }
}
