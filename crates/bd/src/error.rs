//! CLI error types.

use bd_config::ConfigurationError;
use bd_types::ValidationError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigurationError),

    #[error("{0}")]
    Document(#[from] ValidationError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
