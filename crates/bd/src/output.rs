//! Terminal reporting for command results.

use bd_renderer::RenderOutput;
use console::{Style, Term};

/// Stderr reporter for human-facing command output.
///
/// Everything goes to stderr so rendered HTML on stdout stays pipeable.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new reporter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print a plain line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success line (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error line (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a render's collected warnings (yellow), one per line.
    pub(crate) fn render_warnings(&self, warnings: &[String]) {
        for warning in warnings {
            let line = format!("warning: {warning}");
            let _ = self
                .term
                .write_line(&self.yellow.apply_to(line).to_string());
        }
    }

    /// Print render statistics: block counts by outcome and type, plus the
    /// extracted footnotes.
    pub(crate) fn render_stats(&self, result: &RenderOutput) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to("\nRender statistics").to_string());
        self.info(&format!("Blocks rendered: {}", result.blocks_rendered));
        self.info(&format!("Blocks filtered: {}", result.blocks_filtered));
        self.info(&format!("Blocks failed:   {}", result.blocks_failed));
        for (block_type, count) in &result.per_type_counts {
            self.info(&format!("  {block_type}: {count}"));
        }

        if !result.footnotes.is_empty() {
            self.info(&format!("\nFootnotes ({}):", result.footnotes.len()));
            for footnote in &result.footnotes {
                self.info(&format!("  [{}] {}", footnote.index, footnote.target));
            }
        }
    }
}
