//! Delimiter blocks: a themed rule with no payload.

use bd_types::Block;

use crate::blocks::Extraction;
use crate::compose::ExtraData;
use crate::context::RenderContext;
use crate::error::BlockRenderError;

pub(super) fn extract(
    _block: &Block,
    _ctx: &mut RenderContext<'_>,
) -> Result<Extraction, BlockRenderError> {
    // Intentionally contentless; a delimiter is never empty.
    Ok(Extraction {
        variant: None,
        content: None,
        extra: ExtraData::new(),
        is_empty: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bd_config::RenderConfig;
    use serde_json::{Value, json};

    #[test]
    fn test_never_empty_regardless_of_payload() {
        let config = RenderConfig::builtin();
        let mut ctx = RenderContext::new(&config);
        for data in [Value::Null, json!({}), json!({"unexpected": 1})] {
            let block = Block::new("delimiter", data);
            assert!(!extract(&block, &mut ctx).unwrap().is_empty);
        }
    }
}
