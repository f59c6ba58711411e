//! Block document data model.
//!
//! A document is an ordered sequence of typed blocks as produced by a block
//! editor. Block payloads are type-specific and stay as raw JSON in
//! [`Block::data`]; renderers deserialize them into the typed payload
//! structs from [`payload`] on demand, so unknown block types never fail
//! at the document level.
//!
//! # Example
//!
//! ```
//! use bd_types::Document;
//!
//! let doc = Document::from_json(
//!     r#"{"version":"2.30.7","blocks":[{"type":"paragraph","data":{"text":"Hi"}}]}"#,
//! )?;
//! assert_eq!(doc.blocks.len(), 1);
//! assert_eq!(doc.blocks[0].block_type, "paragraph");
//! // Unknown top-level metadata passes through untouched.
//! assert!(doc.extra.contains_key("version"));
//! # Ok::<(), bd_types::ValidationError>(())
//! ```

pub mod payload;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error for malformed document input.
///
/// These are caller-contract violations: the whole render request is
/// rejected, unlike per-block data problems which degrade fail-soft.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The top-level value is not a JSON object.
    #[error("document must be a JSON object")]
    NotAnObject,

    /// The document has no `blocks` field.
    #[error("document has no `blocks` field")]
    MissingBlocks,

    /// The `blocks` field is not an array.
    #[error("`blocks` must be an array")]
    BlocksNotArray,

    /// A block entry is not an object.
    #[error("block {index} is not an object")]
    BlockNotObject {
        /// Position of the offending block.
        index: usize,
    },

    /// A block entry has no string `type` discriminator.
    #[error("block {index} has no string `type`")]
    MissingType {
        /// Position of the offending block.
        index: usize,
    },

    /// The input is not valid JSON.
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// An ordered block document.
///
/// Block order is render-significant. Top-level fields other than `blocks`
/// (editor version, timestamps, ...) are preserved in [`extra`](Self::extra)
/// and pass through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Ordered sequence of blocks.
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Passthrough top-level metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Parse and validate a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Validate and convert an already-parsed JSON value.
    ///
    /// Enforces the caller contract: top level is an object, `blocks` is an
    /// array, every block is an object with a string `type`. Unknown block
    /// types are accepted (they fall back to the generic renderer).
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(map) = &value else {
            return Err(ValidationError::NotAnObject);
        };
        let blocks = map.get("blocks").ok_or(ValidationError::MissingBlocks)?;
        let Value::Array(entries) = blocks else {
            return Err(ValidationError::BlocksNotArray);
        };
        for (index, entry) in entries.iter().enumerate() {
            let Value::Object(block) = entry else {
                return Err(ValidationError::BlockNotObject { index });
            };
            if !block.get("type").is_some_and(Value::is_string) {
                return Err(ValidationError::MissingType { index });
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// One semantic document unit: a type discriminator plus type-specific data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Opaque editor-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Block type discriminator (`header`, `paragraph`, `list`, ...).
    #[serde(rename = "type")]
    pub block_type: String,
    /// Type-specific payload, kept raw until a renderer claims it.
    #[serde(default)]
    pub data: Value,
}

impl Block {
    /// Create a block from a type name and payload.
    #[must_use]
    pub fn new(block_type: impl Into<String>, data: Value) -> Self {
        Self {
            id: None,
            block_type: block_type.into(),
            data,
        }
    }
}
