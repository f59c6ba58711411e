//! Per-render footnote registry.
//!
//! Links extracted by the inline processor are numbered monotonically in
//! document order. The registry lives inside one render call's
//! [`RenderContext`](crate::RenderContext) and is never shared between
//! renders, so concurrent documents cannot corrupt each other's numbering.

use serde::Serialize;

/// One extracted hyperlink reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Footnote {
    /// 1-based position in document order.
    pub index: usize,
    /// Link target, kept verbatim (malformed URLs stay literal text).
    pub target: String,
}

/// Ordered collection of extracted footnotes for a single render.
#[derive(Debug, Default)]
pub struct FootnoteRegistry {
    entries: Vec<Footnote>,
}

impl FootnoteRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a link target and return its 1-based index.
    pub fn add(&mut self, target: &str) -> usize {
        let index = self.entries.len() + 1;
        self.entries.push(Footnote {
            index,
            target: target.to_owned(),
        });
        index
    }

    /// Registered footnotes in document order.
    #[must_use]
    pub fn entries(&self) -> &[Footnote] {
        &self.entries
    }

    /// True when no links were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of extracted links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Consume the registry, yielding its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<Footnote> {
        self.entries
    }
}
