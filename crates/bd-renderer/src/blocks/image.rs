//! Image blocks.
//!
//! A usable URL selects the `default` or `stretched` variant; a missing
//! or blank URL renders the `placeholder` variant and marks the block
//! empty so document assembly filters it out.

use bd_types::Block;
use bd_types::payload::ImageData;

use crate::blocks::{Extraction, payload};
use crate::compose::ExtraData;
use crate::context::RenderContext;
use crate::error::BlockRenderError;

pub(super) fn extract(
    block: &Block,
    ctx: &mut RenderContext<'_>,
) -> Result<Extraction, BlockRenderError> {
    let data: ImageData = payload(block)?;

    let mut extraction = Extraction {
        variant: None,
        content: None,
        extra: ExtraData::new(),
        is_empty: false,
    };

    let caption = data.caption.as_deref().unwrap_or("").trim();
    if !caption.is_empty() {
        let processed = ctx.inline.process(caption, &mut ctx.footnotes);
        extraction.extra.set("caption", processed);
    }

    match data.url() {
        Some(url) => {
            extraction.variant = Some(
                if data.stretched { "stretched" } else { "default" }.to_owned(),
            );
            extraction.extra.set("url", url);
            // Tune flags, exposed for templates with conditional attrs.
            if data.with_border {
                extraction.extra.set("border", "true");
            }
            if data.with_background {
                extraction.extra.set("background", "true");
            }
        }
        None => {
            extraction.variant = Some("placeholder".to_owned());
            extraction.is_empty = true;
        }
    }
    Ok(extraction)
}
