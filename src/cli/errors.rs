//! CLI errors
//!
//! Any of these ends the process with exit code 1. Per-request failures
//! never surface here; they are answered with an error ping instead.

use thiserror::Error;

use crate::config::ConfigError;
use crate::object::ObjectError;
use crate::store::StoreError;

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Startup could not complete
    #[error("Boot failed: {0}")]
    Boot(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Stable code printed in front of the message
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "PLASTER_CLI_CONFIG_ERROR",
            CliError::Io(_) | CliError::Json(_) => "PLASTER_CLI_IO_ERROR",
            CliError::Boot(_) => "PLASTER_CLI_BOOT_FAILED",
            CliError::Store(_) => "PLASTER_CLI_STORE_FAILED",
            CliError::InvalidArgument(_) => "PLASTER_CLI_INVALID_ARGUMENT",
        }
    }
}

impl From<ObjectError> for CliError {
    fn from(e: ObjectError) -> Self {
        CliError::Boot(e.to_string())
    }
}
