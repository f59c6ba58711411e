//! Raw HTML blocks: pre-formed markup, sanitized but never escaped or
//! inline-processed.

use bd_types::Block;
use bd_types::payload::RawData;

use crate::blocks::{Extraction, payload};
use crate::compose::Content;
use crate::context::RenderContext;
use crate::error::BlockRenderError;
use crate::inline::sanitize;

pub(super) fn extract(
    block: &Block,
    _ctx: &mut RenderContext<'_>,
) -> Result<Extraction, BlockRenderError> {
    let data: RawData = payload(block)?;
    let mut extraction = Extraction::new(Content::html(sanitize(&data.html)));
    extraction.is_empty = data.html.trim().is_empty();
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_config::RenderConfig;
    use serde_json::json;

    #[test]
    fn test_passes_markup_through_sanitized() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new(
            "raw",
            json!({"html": "<table><tr><td>x</td></tr></table><script>bad()</script>"}),
        );
        let extraction = extract(&block, &mut ctx).unwrap();
        let html = &extraction.content.unwrap().html;
        assert_eq!(html, "<table><tr><td>x</td></tr></table>");
    }

    #[test]
    fn test_no_inline_styling_applied() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("raw", json!({"html": "<b>kept as authored</b>"}));
        let extraction = extract(&block, &mut ctx).unwrap();
        assert_eq!(extraction.content.unwrap().html, "<b>kept as authored</b>");
    }
}
