//! Renderer error types.

/// Error from a single block's renderer.
///
/// Swallowed by the document assembler: the block is replaced with a
/// diagnostic fragment and the render continues (fail-soft). A missing
/// template is deliberately *not* an error — it falls back through the
/// default variant to the generic renderer.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BlockRenderError {
    /// The block's `data` does not match the type's payload shape.
    #[error("malformed `{block_type}` payload: {source}")]
    Payload {
        /// Block type whose payload failed to deserialize.
        block_type: String,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}
