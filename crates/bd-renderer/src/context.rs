//! Per-render state, threaded explicitly through the engine.

use bd_config::RenderConfig;

use crate::footnotes::FootnoteRegistry;
use crate::inline::InlineProcessor;

/// State for one `render()` invocation.
///
/// Constructed fresh per call and passed by reference; nothing here is
/// global, so concurrent renders with separate contexts cannot interfere
/// with each other's footnote numbering or warnings.
pub struct RenderContext<'a> {
    config: &'a RenderConfig,
    /// Inline processor with theme tokens pre-resolved.
    pub inline: InlineProcessor<'a>,
    /// Footnotes extracted so far, in document order.
    pub footnotes: FootnoteRegistry,
    /// Non-fatal problems encountered so far.
    pub warnings: Vec<String>,
}

impl<'a> RenderContext<'a> {
    /// Create a fresh context over a configuration snapshot.
    #[must_use]
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            inline: InlineProcessor::new(config),
            footnotes: FootnoteRegistry::new(),
            warnings: Vec::new(),
        }
    }

    /// The configuration snapshot for this render.
    #[must_use]
    pub fn config(&self) -> &'a RenderConfig {
        self.config
    }

    /// Record a non-fatal warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}
