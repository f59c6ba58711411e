//! Quote blocks.

use bd_types::Block;
use bd_types::payload::QuoteData;

use crate::blocks::{Extraction, alignment_style, payload};
use crate::compose::Content;
use crate::context::RenderContext;
use crate::error::BlockRenderError;

pub(super) fn extract(
    block: &Block,
    ctx: &mut RenderContext<'_>,
) -> Result<Extraction, BlockRenderError> {
    let data: QuoteData = payload(block)?;

    let html = ctx.inline.process(&data.text, &mut ctx.footnotes);
    let mut extraction = Extraction::new(Content {
        html,
        style: alignment_style(data.alignment.as_deref()),
    });

    let caption = data.caption.as_deref().unwrap_or("").trim();
    if !caption.is_empty() {
        let processed = ctx.inline.process(caption, &mut ctx.footnotes);
        extraction.extra.set("caption", processed);
    }
    extraction.is_empty = data.text.trim().is_empty() && caption.is_empty();
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_config::RenderConfig;
    use serde_json::json;

    #[test]
    fn test_caption_markup_is_processed() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("quote", json!({"text": "Q", "caption": "<b>who</b>"}));
        let extraction = extract(&block, &mut ctx).unwrap();
        let caption = extraction.extra.get("caption").unwrap();
        assert!(caption.contains("<b style="));
    }
}
