//! Typed payloads for the built-in block types.
//!
//! Each struct mirrors one block type's `data` object. All fields are
//! defaulted so partially-filled editor output still deserializes; a type
//! mismatch (e.g. a non-string `text`) is a deserialization error, which
//! the renderer treats as a per-block failure.

use serde::Deserialize;

/// `header` block payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderData {
    /// Heading text with inline markup.
    pub text: String,
    /// Heading level as produced by the editor; clamped to 1..=6 at render.
    pub level: i64,
    /// Optional alignment tune (`left`/`center`/`right`/`justify`).
    pub alignment: Option<String>,
}

impl Default for HeaderData {
    fn default() -> Self {
        Self {
            text: String::new(),
            level: 2,
            alignment: None,
        }
    }
}

/// `paragraph` block payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParagraphData {
    /// Paragraph text with inline markup.
    pub text: String,
    /// Optional caption line below the paragraph.
    pub caption: Option<String>,
    /// Optional alignment tune.
    pub alignment: Option<String>,
}

/// `quote` block payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteData {
    /// Quoted text with inline markup.
    pub text: String,
    /// Attribution / caption.
    pub caption: Option<String>,
    /// Optional alignment tune.
    pub alignment: Option<String>,
}

/// `code` block payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CodeData {
    /// Verbatim source text. Never interpreted as markup.
    #[serde(alias = "text")]
    pub code: String,
    /// Optional language hint.
    pub language: Option<String>,
}

/// `raw` block payload: pre-formed HTML.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawData {
    /// Raw HTML passed through (sanitized, not escaped).
    #[serde(alias = "content")]
    pub html: String,
}

/// `image` block payload.
///
/// Editors emit two shapes: `{"file": {"url": ...}}` (upload tool) and a
/// flat `{"url": ...}` (simple tool). Both are accepted.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageData {
    /// Uploaded file descriptor.
    pub file: Option<ImageFile>,
    /// Flat URL variant.
    pub url: Option<String>,
    /// Optional caption with inline markup.
    pub caption: Option<String>,
    /// Stretch the image to container width.
    pub stretched: bool,
    /// Draw a border around the image.
    pub with_border: bool,
    /// Draw the image on a padded background.
    pub with_background: bool,
}

/// Uploaded file descriptor inside an `image` payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImageFile {
    /// Resolved file URL.
    pub url: String,
}

impl ImageData {
    /// Effective image URL, from either payload shape.
    ///
    /// Returns `None` when both shapes are absent or blank.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.file
            .as_ref()
            .map(|f| f.url.as_str())
            .or(self.url.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

/// List style discriminator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// Bulleted list.
    #[default]
    Unordered,
    /// Numbered list.
    Ordered,
    /// Task list with per-item check state.
    Checklist,
}

impl ListStyle {
    /// Variant name used for template lookup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unordered => "unordered",
            Self::Ordered => "ordered",
            Self::Checklist => "checklist",
        }
    }
}

/// CSS counter style for ordered lists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterType {
    /// 1, 2, 3.
    Decimal,
    /// a, b, c.
    LowerAlpha,
    /// i, ii, iii.
    LowerRoman,
    /// A, B, C.
    UpperAlpha,
    /// I, II, III.
    UpperRoman,
}

impl CounterType {
    /// The `list-style-type` CSS value.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::LowerAlpha => "lower-alpha",
            Self::LowerRoman => "lower-roman",
            Self::UpperAlpha => "upper-alpha",
            Self::UpperRoman => "upper-roman",
        }
    }
}

/// `list` block payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListData {
    /// List style; nested lists inherit it unless overridden per item.
    pub style: ListStyle,
    /// List-level metadata.
    pub meta: ListMeta,
    /// Top-level items.
    pub items: Vec<ListItem>,
}

/// List-level metadata.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListMeta {
    /// Explicit counter style for this list only.
    pub counter_type: Option<CounterType>,
}

/// One list item, possibly with a nested sublist.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListItem {
    /// Item text with inline markup.
    pub content: String,
    /// Check state (older flat payload shape).
    pub checked: Option<bool>,
    /// Item metadata (newer payload shape).
    pub meta: ListItemMeta,
    /// Nested items. Depth is unbounded on the wire.
    pub items: Vec<ListItem>,
}

/// Per-item metadata.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListItemMeta {
    /// Check state for checklist items.
    pub checked: Option<bool>,
    /// Explicit counter style for this item's sublist only.
    pub counter_type: Option<CounterType>,
    /// Explicit style override for this item's sublist.
    pub style: Option<ListStyle>,
}

impl ListItem {
    /// Effective check state: `meta.checked` wins over the flat field.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.meta.checked.or(self.checked).unwrap_or(false)
    }
}
