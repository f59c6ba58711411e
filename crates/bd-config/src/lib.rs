//! Theme and template configuration for the blockdown renderer.
//!
//! Configuration is plain JSON: a nested theme token map, an inline-tag
//! style map, and per-block-type template variant trees. It is loaded
//! once, validated up front, and read-only during a render; hot swaps
//! between renders go through [`ConfigStore`].
//!
//! A complete built-in configuration ships with the crate
//! ([`RenderConfig::builtin`]), so the engine renders out of the box and
//! downstream themes only need to override what they change.

mod store;
mod template;
mod theme;

pub use store::ConfigStore;
pub use template::{
    InlineStyleHandling, MergeStrategy, StylePriority, TemplateLayer, VariantSet,
};
pub use theme::Theme;

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../assets/default-config.json");

/// Error loading or validating configuration.
///
/// Configuration problems are fatal at load time, never at render time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The input is not valid JSON or has a mistyped field.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required top-level section is absent.
    #[error("configuration is missing required section `{0}`")]
    MissingSection(&'static str),

    /// A block type declares an empty variant map.
    #[error("block type `{block_type}` declares no template variants")]
    EmptyVariants {
        /// The offending block type.
        block_type: String,
    },

    /// I/O error reading a configuration file.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Hard limits applied during a render.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Limits {
    /// Maximum nested-list depth; deeper subtrees are truncated with a
    /// warning.
    pub max_list_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_list_depth: 32 }
    }
}

/// Complete render configuration: theme, inline styles, and templates.
///
/// Immutable once loaded. Cheap to share behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Theme token map.
    pub theme: Theme,
    /// Inline tag name → themed style string.
    pub inline_styles: BTreeMap<String, String>,
    /// Block type → ordered template variants.
    pub templates: BTreeMap<String, VariantSet>,
    /// Link hosts rendered in place instead of being footnoted. An entry
    /// matches the host itself and any subdomain.
    pub keep_link_hosts: Vec<String>,
    /// Optional container template wrapping the whole document.
    pub container: Option<TemplateLayer>,
    /// Render limits.
    pub limits: Limits,
}

impl RenderConfig {
    /// Parse and validate configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Validate and convert an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigurationError> {
        let Some(map) = value.as_object() else {
            return Err(ConfigurationError::Json(serde::de::Error::custom(
                "configuration must be a JSON object",
            )));
        };
        for section in ["theme", "templates"] {
            if !map.contains_key(section) {
                return Err(ConfigurationError::MissingSection(section));
            }
        }

        let config: Self = serde_json::from_value(value)?;
        for (block_type, variants) in &config.templates {
            if variants.is_empty() {
                return Err(ConfigurationError::EmptyVariants {
                    block_type: block_type.clone(),
                });
            }
        }
        Ok(config)
    }

    /// The built-in default configuration.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json(DEFAULT_CONFIG).expect("embedded default configuration is valid")
    }

    /// Resolved style string for an inline tag, if one is configured.
    #[must_use]
    pub fn inline_style(&self, tag: &str) -> Option<&str> {
        self.inline_styles.get(tag).map(String::as_str)
    }
}
