//! CLI error types.

use docshell_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}
