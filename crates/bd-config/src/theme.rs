//! Theme token map with dotted-path lookup.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Nested theme token map.
///
/// Tokens are style strings addressed by dotted paths, e.g.
/// `color.accent` or `heading.h1`. Lookups never fail hard: a missing
/// path simply resolves to `None` and the placeholder that referenced it
/// stays literal in the output.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Theme(Map<String, Value>);

impl Theme {
    /// Build a theme from a JSON object.
    #[must_use]
    pub fn new(tokens: Map<String, Value>) -> Self {
        Self(tokens)
    }

    /// Resolve a dotted path to a string token.
    ///
    /// Intermediate path segments must be objects; the final segment must
    /// be a string. Anything else resolves to `None`.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        current.as_str()
    }

    /// True when the theme has no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn theme() -> Theme {
        serde_json::from_value(json!({
            "color": {"accent": "#009688", "text": "#333"},
            "heading": {"h1": "font-size: 28px;"},
            "depth": {"a": {"b": {"c": "deep"}}}
        }))
        .unwrap()
    }

    #[test]
    fn test_lookup_nested_paths() {
        let t = theme();
        assert_eq!(t.lookup("color.accent"), Some("#009688"));
        assert_eq!(t.lookup("heading.h1"), Some("font-size: 28px;"));
        assert_eq!(t.lookup("depth.a.b.c"), Some("deep"));
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let t = theme();
        assert_eq!(t.lookup("color.missing"), None);
        assert_eq!(t.lookup("nope"), None);
        assert_eq!(t.lookup(""), None);
    }

    #[test]
    fn test_lookup_non_string_leaf_is_none() {
        let t = theme();
        // an object is not a token
        assert_eq!(t.lookup("color"), None);
        // descending through a string fails
        assert_eq!(t.lookup("color.accent.deeper"), None);
    }
}
