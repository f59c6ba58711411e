//! Template layer trees and variant sets.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// One node of a template's nested-tag tree.
///
/// A layer either wraps its children, carries templated literal `text`,
/// or is the designated content layer that receives a block's rendered
/// inline content. Templated strings (`style`, `attrs` values, `text`)
/// may use three placeholder forms:
///
/// - `{{theme.a.b}}` — theme token lookup (stays literal when unresolved)
/// - `{{field}}` — block-specific extra data (stays literal when missing)
/// - `{{?field}}` — conditional: the field's value when truthy, otherwise
///   the owning attribute (or the whole layer, for `text`) is removed
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateLayer {
    /// HTML tag name.
    pub tag: String,
    /// Templated inline style. Emitted only when non-empty after
    /// substitution.
    pub style: String,
    /// Additional templated attributes.
    pub attrs: BTreeMap<String, String>,
    /// Templated literal text content for leaf layers.
    pub text: Option<String>,
    /// Whether this layer receives the block's rendered content.
    pub is_content_layer: bool,
    /// Child layers.
    pub children: Vec<TemplateLayer>,
    /// How a content layer resolves inline-vs-template style conflicts.
    pub inline_style_handling: Option<InlineStyleHandling>,
}

/// Inline-vs-template style conflict resolution for a content layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InlineStyleHandling {
    /// Whether styles are merged or one side replaces the other.
    pub strategy: MergeStrategy,
    /// Emit the inline style on a dedicated wrapper span instead of the
    /// layer tag.
    pub need_wrapper: bool,
    /// Which side wins on conflicting declarations.
    pub priority: StylePriority,
}

impl Default for InlineStyleHandling {
    fn default() -> Self {
        Self {
            strategy: MergeStrategy::Merge,
            need_wrapper: false,
            priority: StylePriority::Inline,
        }
    }
}

/// Style combination strategy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Concatenate both styles; the prioritized side goes last so its
    /// declarations win.
    #[default]
    Merge,
    /// Keep only the prioritized side.
    Replace,
}

/// Which style wins a conflict.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePriority {
    /// Block-local inline style wins.
    #[default]
    Inline,
    /// Template style wins.
    Template,
}

/// Ordered set of named template variants for one block type.
///
/// JSON object order is preserved so the "first declared variant"
/// fallback is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariantSet {
    entries: Vec<(String, TemplateLayer)>,
}

impl VariantSet {
    /// Look up a variant by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TemplateLayer> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, layer)| layer)
    }

    /// The first declared variant, if any.
    #[must_use]
    pub fn first(&self) -> Option<&TemplateLayer> {
        self.entries.first().map(|(_, layer)| layer)
    }

    /// Declared variant names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of declared variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no variants are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, TemplateLayer)> for VariantSet {
    fn from_iter<I: IntoIterator<Item = (String, TemplateLayer)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for VariantSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VariantSetVisitor;

        impl<'de> Visitor<'de> for VariantSetVisitor {
            type Value = VariantSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of variant name to template layer")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, layer)) = map.next_entry::<String, TemplateLayer>()? {
                    entries.push((name, layer));
                }
                Ok(VariantSet { entries })
            }
        }

        deserializer.deserialize_map(VariantSetVisitor)
    }
}
