//! `bd render` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;

use bd_config::RenderConfig;
use bd_types::Document;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the block document JSON file (`-` for stdin).
    input: PathBuf,

    /// Path to a configuration file (default: built-in configuration).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the HTML here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print footnotes and render statistics to stderr.
    #[arg(long)]
    stats: bool,

    /// Enable info-level logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error when the input or configuration cannot be read or
    /// does not validate. Per-block problems never fail the command; they
    /// surface as warnings.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = load_config(self.config.as_deref())?;
        let document = Document::from_json(&read_input(&self.input)?)?;

        let result = bd_renderer::render(&document, &config);
        tracing::info!(
            rendered = result.blocks_rendered,
            filtered = result.blocks_filtered,
            failed = result.blocks_failed,
            "render finished"
        );

        output.render_warnings(&result.warnings);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &result.html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.html.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }

        if self.stats {
            output.render_stats(&result);
        }
        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig, CliError> {
    match path {
        Some(path) => Ok(RenderConfig::from_json(&std::fs::read_to_string(path)?)?),
        None => Ok(RenderConfig::builtin()),
    }
}

fn read_input(input: &Path) -> Result<String, CliError> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(input)?)
    }
}

