//! Header blocks.

use bd_types::Block;
use bd_types::payload::HeaderData;

use crate::blocks::{Extraction, alignment_style, payload};
use crate::compose::Content;
use crate::context::RenderContext;
use crate::error::BlockRenderError;

pub(super) fn extract(
    block: &Block,
    ctx: &mut RenderContext<'_>,
) -> Result<Extraction, BlockRenderError> {
    let data: HeaderData = payload(block)?;
    let level = data.level.clamp(1, 6);

    let html = ctx.inline.process(&data.text, &mut ctx.footnotes);
    let mut extraction = Extraction::new(Content {
        html,
        style: alignment_style(data.alignment.as_deref()),
    });
    extraction.variant = Some(format!("h{level}"));
    extraction.is_empty = data.text.trim().is_empty();
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_config::RenderConfig;
    use serde_json::json;

    #[test]
    fn test_level_clamps_into_h1_h6() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);

        let high = Block::new("header", json!({"text": "T", "level": 7}));
        let extraction = extract(&high, &mut ctx).unwrap();
        assert_eq!(extraction.variant.as_deref(), Some("h6"));

        let low = Block::new("header", json!({"text": "T", "level": 0}));
        let extraction = extract(&low, &mut ctx).unwrap();
        assert_eq!(extraction.variant.as_deref(), Some("h1"));
    }

    #[test]
    fn test_default_level_is_h2() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("header", json!({"text": "T"}));
        let extraction = extract(&block, &mut ctx).unwrap();
        assert_eq!(extraction.variant.as_deref(), Some("h2"));
    }

    #[test]
    fn test_blank_text_is_empty() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("header", json!({"text": "  "}));
        assert!(extract(&block, &mut ctx).unwrap().is_empty);
    }
}
