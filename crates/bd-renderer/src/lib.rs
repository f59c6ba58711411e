//! Template-driven rendering of block documents to themed HTML.
//!
//! The pipeline per block: a typed extractor pulls content and
//! placeholder data from the payload, the template registry resolves a
//! `(type, variant)` layer tree, and the compositor folds the tree into
//! HTML with theme tokens substituted. [`render`] drives the whole
//! document fail-soft and appends the footnote section; [`render_block`]
//! exposes the single-block path.
//!
//! All inline styling is driven by [`bd_config::RenderConfig`]; nothing
//! in this crate hardcodes presentation.

mod assembler;
mod blocks;
mod compose;
mod context;
mod error;
mod escape;
mod footnotes;
mod inline;
mod registry;

pub use assembler::{RenderOutput, render};
pub use blocks::{RenderedBlock, render_block};
pub use compose::{Compositor, Content, ExtraData};
pub use context::RenderContext;
pub use error::BlockRenderError;
pub use escape::{escape_attr, escape_html};
pub use footnotes::{Footnote, FootnoteRegistry};
pub use inline::{InlineProcessor, sanitize};
pub use registry::TemplateRegistry;
