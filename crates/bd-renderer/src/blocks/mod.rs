//! Per-block-type rendering.
//!
//! Block types are handled by a data table mapping the type name to an
//! extraction function; one generic routine drives template resolution
//! and composition for all of them. Unknown types flow through the
//! generic fallback and are never dropped silently.

mod code;
mod delimiter;
mod generic;
mod header;
mod image;
mod list;
mod paragraph;
mod quote;
mod raw;

use serde::de::DeserializeOwned;
use serde_json::Value;

use bd_types::Block;

use crate::compose::{Compositor, Content, ExtraData};
use crate::context::RenderContext;
use crate::error::BlockRenderError;
use crate::registry::TemplateRegistry;

/// What a block extractor hands to the generic render routine.
pub struct Extraction {
    /// Template variant to resolve (heading level, list style, ...).
    pub variant: Option<String>,
    /// Rendered content for the template's content layer.
    pub content: Option<Content>,
    /// Block-specific placeholder values.
    pub extra: ExtraData,
    /// Whether the block is canonically empty (filtered from document
    /// output; still rendered by direct `render_block` calls).
    pub is_empty: bool,
}

impl Extraction {
    fn new(content: Content) -> Self {
        Self {
            variant: None,
            content: Some(content),
            extra: ExtraData::new(),
            is_empty: false,
        }
    }
}

/// Pure extraction function for one block type.
type ExtractFn = for<'a> fn(&Block, &mut RenderContext<'a>) -> Result<Extraction, BlockRenderError>;

/// Table entry binding a block type to its extractor.
struct BlockSpec {
    block_type: &'static str,
    extract: ExtractFn,
}

/// The closed set of built-in block types.
static BLOCK_TABLE: &[BlockSpec] = &[
    BlockSpec { block_type: "header", extract: header::extract },
    BlockSpec { block_type: "paragraph", extract: paragraph::extract },
    BlockSpec { block_type: "quote", extract: quote::extract },
    BlockSpec { block_type: "code", extract: code::extract },
    BlockSpec { block_type: "raw", extract: raw::extract },
    BlockSpec { block_type: "image", extract: image::extract },
    BlockSpec { block_type: "delimiter", extract: delimiter::extract },
    BlockSpec { block_type: "list", extract: list::extract },
];

fn spec_for(block_type: &str) -> Option<&'static BlockSpec> {
    BLOCK_TABLE.iter().find(|spec| spec.block_type == block_type)
}

/// One block's rendering result.
pub struct RenderedBlock {
    /// HTML fragment.
    pub html: String,
    /// Whether the document assembler should filter this block out.
    pub is_empty: bool,
}

/// Render a single block against the context's configuration.
///
/// Unknown types use the generic fallback; a missing template falls back
/// through the variant chain and finally to a flagged fragment. Only a
/// malformed payload is an error, and the assembler swallows that.
pub fn render_block(
    block: &Block,
    ctx: &mut RenderContext<'_>,
) -> Result<RenderedBlock, BlockRenderError> {
    let (template_key, extraction) = match spec_for(&block.block_type) {
        Some(spec) => (spec.block_type, (spec.extract)(block, ctx)?),
        None => ("unknown", generic::extract(block, ctx)?),
    };

    let registry = TemplateRegistry::new(ctx.config());
    let compositor = Compositor::new(&ctx.config().theme);
    let html = match registry.get(template_key, extraction.variant.as_deref()) {
        Some(layer) => compositor.compose(layer, extraction.content.as_ref(), &extraction.extra),
        None => {
            tracing::debug!(
                block_type = %block.block_type,
                "no template resolved; using flagged fallback fragment"
            );
            generic::fallback_fragment(&block.block_type, extraction.content.as_ref())
        }
    };

    Ok(RenderedBlock {
        html,
        is_empty: extraction.is_empty,
    })
}

/// Deserialize a block payload, mapping failures to [`BlockRenderError`].
///
/// A `null`/absent payload deserializes as the type's defaults.
fn payload<T: DeserializeOwned>(block: &Block) -> Result<T, BlockRenderError> {
    let data = if block.data.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        block.data.clone()
    };
    serde_json::from_value(data).map_err(|source| BlockRenderError::Payload {
        block_type: block.block_type.clone(),
        source,
    })
}

/// Inline style for an editor alignment tune, if the value is recognized.
fn alignment_style(alignment: Option<&str>) -> Option<String> {
    match alignment? {
        a @ ("left" | "center" | "right" | "justify") => Some(format!("text-align: {a};")),
        _ => None,
    }
}
