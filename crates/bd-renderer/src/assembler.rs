//! Document assembly: a block sequence to one themed HTML fragment.
//!
//! Assembly is fail-soft: a malformed block becomes a comment marker and
//! a warning, never a failed document. Canonically empty blocks are
//! filtered out, the footnote section is appended when links were
//! extracted, and the optional container template wraps the result.

use std::collections::BTreeMap;
use std::fmt::Write;

use bd_config::RenderConfig;
use bd_types::Document;

use crate::blocks::{self, RenderedBlock};
use crate::compose::{Compositor, Content, ExtraData};
use crate::context::RenderContext;
use crate::escape::escape_html;
use crate::footnotes::Footnote;

/// Result of one document render.
#[derive(Debug)]
pub struct RenderOutput {
    /// Final HTML fragment.
    pub html: String,
    /// Extracted link footnotes in document order.
    pub footnotes: Vec<Footnote>,
    /// Non-fatal problems encountered (skipped blocks, truncated lists,
    /// unsupported types).
    pub warnings: Vec<String>,
    /// Blocks that produced output.
    pub blocks_rendered: usize,
    /// Blocks filtered out as empty.
    pub blocks_filtered: usize,
    /// Blocks skipped because their payload was malformed.
    pub blocks_failed: usize,
    /// Input block count by type, including filtered and failed blocks.
    pub per_type_counts: BTreeMap<String, usize>,
}

/// Render a whole document against a configuration snapshot.
#[must_use]
pub fn render(document: &Document, config: &RenderConfig) -> RenderOutput {
    let mut ctx = RenderContext::new(config);
    let compositor = Compositor::new(&config.theme);

    let mut body = String::new();
    let mut rendered = 0;
    let mut filtered = 0;
    let mut failed = 0;
    let mut per_type_counts = BTreeMap::new();

    for block in &document.blocks {
        *per_type_counts
            .entry(block.block_type.clone())
            .or_insert(0) += 1;
        match blocks::render_block(block, &mut ctx) {
            Ok(RenderedBlock { is_empty: true, .. }) => {
                filtered += 1;
                tracing::debug!(block_type = %block.block_type, "filtered empty block");
            }
            Ok(RenderedBlock { html, .. }) => {
                body.push_str(&html);
                rendered += 1;
            }
            Err(error) => {
                failed += 1;
                tracing::warn!(
                    block_type = %block.block_type,
                    block_id = ?block.id,
                    error = %error,
                    "skipping malformed block"
                );
                ctx.warn(format!(
                    "skipped \"{}\" block: {error}",
                    block.block_type
                ));
                let _ = write!(
                    body,
                    "<!-- skipped \"{}\" block -->",
                    escape_html(&block.block_type)
                );
            }
        }
    }

    if !ctx.footnotes.is_empty() {
        body.push_str(&footnote_section(&compositor, config, ctx.footnotes.entries()));
    }

    let html = match &config.container {
        Some(layer) => compositor.compose(layer, Some(&Content::html(body)), &ExtraData::new()),
        None => body,
    };

    tracing::debug!(rendered, filtered, failed, "document assembled");
    RenderOutput {
        html,
        footnotes: ctx.footnotes.into_entries(),
        warnings: ctx.warnings,
        blocks_rendered: rendered,
        blocks_filtered: filtered,
        blocks_failed: failed,
        per_type_counts,
    }
}

/// Render the trailing footnote section from the `footnotes` templates,
/// with plain markup fallbacks when a layer is not configured.
fn footnote_section(
    compositor: &Compositor<'_>,
    config: &RenderConfig,
    entries: &[Footnote],
) -> String {
    let variants = config.templates.get("footnotes");
    let item_layer = variants.and_then(|v| v.get("item"));
    let section_layer = variants.and_then(|v| v.get("section"));

    let mut items = String::new();
    for footnote in entries {
        match item_layer {
            Some(layer) => {
                let mut extra = ExtraData::new();
                extra.set("index", footnote.index.to_string());
                extra.set("target", escape_html(&footnote.target));
                items.push_str(&compositor.compose(layer, None, &extra));
            }
            None => {
                let _ = write!(
                    items,
                    "<p>[{}] {}</p>",
                    footnote.index,
                    escape_html(&footnote.target)
                );
            }
        }
    }

    match section_layer {
        Some(layer) => compositor.compose(layer, Some(&Content::html(items)), &ExtraData::new()),
        None => format!("<div>{items}</div>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> Document {
        Document::from_value(value).unwrap()
    }

    #[test]
    fn test_malformed_block_is_skipped_not_fatal() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "header", "data": {"text": "Title"}},
            {"type": "paragraph", "data": {"text": "one"}},
            {"type": "paragraph", "data": {"text": {"bad": "shape"}}},
            {"type": "quote", "data": {"text": "two"}},
            {"type": "code", "data": {"code": "three"}},
            {"type": "delimiter", "data": {}}
        ]}));
        let out = render(&doc, &config);
        for fragment in ["Title", "one", "two", "three", "<hr"] {
            assert!(out.html.contains(fragment), "lost `{fragment}`");
        }
        assert!(out.html.contains("<!-- skipped \"paragraph\" block -->"));
        assert_eq!(out.blocks_rendered, 5);
        assert_eq!(out.blocks_failed, 1);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.per_type_counts.get("paragraph"), Some(&2));
    }

    #[test]
    fn test_empty_blocks_are_filtered() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "paragraph", "data": {"text": "  "}},
            {"type": "image", "data": {"caption": "no url"}},
            {"type": "paragraph", "data": {"text": "kept"}}
        ]}));
        let out = render(&doc, &config);
        assert!(out.html.contains("kept"));
        assert!(!out.html.contains("no url"));
        assert_eq!(out.blocks_filtered, 2);
        assert_eq!(out.blocks_rendered, 1);
    }

    #[test]
    fn test_delimiter_survives_emptiness_filtering() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [{"type": "delimiter", "data": {}}]}));
        let out = render(&doc, &config);
        assert!(out.html.contains("<hr"));
        assert_eq!(out.blocks_filtered, 0);
    }

    #[test]
    fn test_footnote_section_appended_and_numbering_resets() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "paragraph", "data": {"text": "see <a href=\"https://a.net/1\">one</a>"}},
            {"type": "paragraph", "data": {"text": "and <a href=\"https://b.net/2\">two</a>"}}
        ]}));

        let out = render(&doc, &config);
        assert!(out.html.contains("[1] https://a.net/1"));
        assert!(out.html.contains("[2] https://b.net/2"));
        assert_eq!(out.footnotes.len(), 2);

        // A fresh render restarts numbering at 1.
        let again = render(&doc, &config);
        assert_eq!(again.footnotes[0].index, 1);
    }

    #[test]
    fn test_no_footnote_section_without_links() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "paragraph", "data": {"text": "plain"}}
        ]}));
        let out = render(&doc, &config);
        assert!(out.footnotes.is_empty());
        assert!(!out.html.contains("border-top"));
    }

    #[test]
    fn test_container_wraps_document() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "paragraph", "data": {"text": "inside"}}
        ]}));
        let out = render(&doc, &config);
        assert!(out.html.starts_with("<article"));
        assert!(out.html.ends_with("</article>"));
    }

    #[test]
    fn test_no_container_leaves_fragment_bare() {
        let config = RenderConfig::from_value(json!({
            "theme": {},
            "templates": {"paragraph": {"default": {"tag": "p", "isContentLayer": true}}}
        }))
        .unwrap();
        let doc = document(json!({"blocks": [
            {"type": "paragraph", "data": {"text": "bare"}}
        ]}));
        let out = render(&doc, &config);
        assert_eq!(out.html, "<p>bare</p>");
    }

    #[test]
    fn test_unknown_type_is_flagged_in_output() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "gallery", "data": {"text": "pics"}}
        ]}));
        let out = render(&doc, &config);
        assert!(out.html.contains("unsupported block: gallery"));
        assert!(out.warnings.iter().any(|w| w.contains("gallery")));
    }

    #[test]
    fn test_header_beyond_h6_renders_as_h6() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "header", "data": {"text": "Deep", "level": 9}}
        ]}));
        let out = render(&doc, &config);
        assert!(out.html.contains("<h6"));
        assert!(out.html.contains("Deep"));
    }

    #[test]
    fn test_ordered_list_defaults_to_decimal() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "list", "data": {"style": "ordered", "items": [{"content": "one"}]}}
        ]}));
        let out = render(&doc, &config);
        assert!(out.html.contains("list-style-type: decimal;"));
    }

    #[test]
    fn test_footnote_target_is_escaped() {
        let config = RenderConfig::builtin();
        let doc = document(json!({"blocks": [
            {"type": "paragraph", "data": {"text": "<a href=\"https://a.net/?q=1&r=2\">q</a>"}}
        ]}));
        let out = render(&doc, &config);
        assert!(out.html.contains("https://a.net/?q=1&amp;r=2"));
    }
}
