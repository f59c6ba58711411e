//! Fallback handling for block types outside the built-in table.
//!
//! Unknown blocks are flagged visibly rather than dropped: the `unknown`
//! template gets the type name and whatever text the payload carries.

use serde_json::Value;

use bd_types::Block;

use crate::blocks::Extraction;
use crate::compose::{Content, ExtraData};
use crate::context::RenderContext;
use crate::error::BlockRenderError;
use crate::escape::escape_html;

pub(super) fn extract(
    block: &Block,
    ctx: &mut RenderContext<'_>,
) -> Result<Extraction, BlockRenderError> {
    ctx.warn(format!("unsupported block type \"{}\"", block.block_type));

    let mut extra = ExtraData::new();
    extra.set("blockType", escape_html(&block.block_type));

    // Best-effort content from the field names editors commonly use.
    let text = match &block.data {
        Value::Object(map) => ["text", "content", "caption", "message"]
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .unwrap_or(""),
        _ => "",
    };

    Ok(Extraction {
        variant: None,
        content: Some(Content::html(escape_html(text))),
        extra,
        is_empty: false,
    })
}

/// Last-resort fragment when no template resolves at all.
pub(super) fn fallback_fragment(block_type: &str, content: Option<&Content>) -> String {
    let inner = content.map_or("", |c| c.html.as_str());
    format!(
        "<!-- no template for \"{}\" block -->{inner}",
        escape_html(block_type)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_config::RenderConfig;
    use serde_json::json;

    #[test]
    fn test_unknown_type_is_flagged_and_warned() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("gallery", json!({"text": "three photos"}));
        let extraction = extract(&block, &mut ctx).unwrap();
        assert_eq!(extraction.extra.get("blockType"), Some("gallery"));
        assert_eq!(extraction.content.unwrap().html, "three photos");
        assert!(!extraction.is_empty);
        assert_eq!(ctx.warnings.len(), 1);
    }

    #[test]
    fn test_salvages_common_field_names() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("callout", json!({"message": "heads up"}));
        let extraction = extract(&block, &mut ctx).unwrap();
        assert_eq!(extraction.content.unwrap().html, "heads up");
    }

    #[test]
    fn test_type_name_is_escaped() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("<svg>", json!({}));
        let extraction = extract(&block, &mut ctx).unwrap();
        assert_eq!(extraction.extra.get("blockType"), Some("&lt;svg&gt;"));
    }

    #[test]
    fn test_fallback_fragment_keeps_content() {
        let fragment = fallback_fragment("widget", Some(&Content::html("kept")));
        assert_eq!(fragment, "<!-- no template for \"widget\" block -->kept");
    }
}
