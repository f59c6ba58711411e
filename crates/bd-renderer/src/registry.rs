//! Template resolution by block type and variant.

use bd_config::{RenderConfig, TemplateLayer};

/// Resolves `(block type, variant)` to a template layer tree.
///
/// Resolution order: exact `(type, variant)` → the type's `default`
/// entry → the first declared variant → `None`, which sends the block to
/// the generic fallback renderer. Pure and side-effect-free.
#[derive(Clone, Copy, Debug)]
pub struct TemplateRegistry<'a> {
    config: &'a RenderConfig,
}

impl<'a> TemplateRegistry<'a> {
    /// Create a registry over a configuration snapshot.
    #[must_use]
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Resolve a template for a block type and optional variant.
    #[must_use]
    pub fn get(&self, block_type: &str, variant: Option<&str>) -> Option<&'a TemplateLayer> {
        let variants = self.config.templates.get(block_type)?;
        variant
            .and_then(|name| variants.get(name))
            .or_else(|| variants.get("default"))
            .or_else(|| variants.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> RenderConfig {
        RenderConfig::from_value(json!({
            "theme": {},
            "templates": {
                "header": {
                    "h1": {"tag": "h1"},
                    "h2": {"tag": "h2"}
                },
                "quote": {
                    "fancy": {"tag": "aside"},
                    "default": {"tag": "blockquote"}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_exact_variant_wins() {
        let config = config();
        let registry = TemplateRegistry::new(&config);
        assert_eq!(registry.get("header", Some("h2")).unwrap().tag, "h2");
        assert_eq!(registry.get("quote", Some("fancy")).unwrap().tag, "aside");
    }

    #[test]
    fn test_unknown_variant_falls_back_to_default() {
        let config = config();
        let registry = TemplateRegistry::new(&config);
        assert_eq!(
            registry.get("quote", Some("missing")).unwrap().tag,
            "blockquote"
        );
    }

    #[test]
    fn test_no_default_falls_back_to_first_declared() {
        let config = config();
        let registry = TemplateRegistry::new(&config);
        assert_eq!(registry.get("header", Some("h9")).unwrap().tag, "h1");
        assert_eq!(registry.get("header", None).unwrap().tag, "h1");
    }

    #[test]
    fn test_unknown_type_is_none() {
        let config = config();
        let registry = TemplateRegistry::new(&config);
        assert!(registry.get("gallery", None).is_none());
    }
}
