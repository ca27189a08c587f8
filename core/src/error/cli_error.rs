// core/src/error/cli_error.rs
use thiserror::Error;

use super::{ApprovalError, ConfigError, SourceError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),

    #[error("approval check could not complete")]
    Approval(#[from] ApprovalError),

    #[error("declaration source error")]
    Source(#[from] SourceError),

    #[error("render error: {0}")]
    Render(String),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// Process exit code for a request that could not be completed.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
