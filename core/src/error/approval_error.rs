// core/src/error/approval_error.rs
use thiserror::Error;

use super::SourceError;

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("declaration source error")]
    Source(#[from] SourceError),

    #[error("changed file is outside the repository root: {0}")]
    PathOutsideRoot(String),
}
