mod approval_error;
mod cli_error;
mod config_error;
mod source_error;

pub use approval_error::ApprovalError;
pub use cli_error::CliError;
pub use config_error::ConfigError;
pub use source_error::SourceError;
