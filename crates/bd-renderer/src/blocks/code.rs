//! Code blocks.
//!
//! Code content is escaped verbatim and never inline-processed: markup
//! inside a code block is data, not formatting.

use bd_types::Block;
use bd_types::payload::CodeData;

use crate::blocks::{Extraction, payload};
use crate::compose::Content;
use crate::context::RenderContext;
use crate::error::BlockRenderError;
use crate::escape::escape_html;

pub(super) fn extract(
    block: &Block,
    _ctx: &mut RenderContext<'_>,
) -> Result<Extraction, BlockRenderError> {
    let data: CodeData = payload(block)?;

    let mut extraction = Extraction::new(Content::html(escape_html(&data.code)));
    if let Some(language) = data.language.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        extraction.extra.set("language", language);
    }
    extraction.is_empty = data.code.trim().is_empty();
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_config::RenderConfig;
    use serde_json::json;

    #[test]
    fn test_markup_is_escaped_not_styled() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("code", json!({"code": "<b>not bold</b> && x < 1"}));
        let extraction = extract(&block, &mut ctx).unwrap();
        let html = &extraction.content.unwrap().html;
        assert_eq!(html, "&lt;b&gt;not bold&lt;/b&gt; &amp;&amp; x &lt; 1");
    }

    #[test]
    fn test_language_hint_exposed() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        let block = Block::new("code", json!({"code": "x", "language": "rust"}));
        let extraction = extract(&block, &mut ctx).unwrap();
        assert_eq!(extraction.extra.get("language"), Some("rust"));
    }
}
