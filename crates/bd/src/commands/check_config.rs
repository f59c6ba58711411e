//! `bd check-config` command implementation.

use std::path::PathBuf;

use clap::Args;

use bd_config::RenderConfig;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check-config command.
#[derive(Args)]
pub(crate) struct CheckConfigArgs {
    /// Path to the configuration file to validate.
    config: PathBuf,

    /// Enable info-level logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckConfigArgs {
    /// Execute the check-config command.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or the configuration
    /// does not validate.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = RenderConfig::from_json(&std::fs::read_to_string(&self.config)?)?;

        output.success(&format!("{} is valid", self.config.display()));
        output.info(&format!("Block types: {}", config.templates.len()));
        for (block_type, variants) in &config.templates {
            output.info(&format!(
                "  {block_type}: {}",
                variants.names().collect::<Vec<_>>().join(", ")
            ));
        }
        if !config.keep_link_hosts.is_empty() {
            output.info(&format!(
                "Keep-as-is link hosts: {}",
                config.keep_link_hosts.join(", ")
            ));
        }
        output.info(&format!(
            "Container template: {}",
            if config.container.is_some() { "yes" } else { "no" }
        ));
        Ok(())
    }
}
