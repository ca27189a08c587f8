mod types;
mod validate;

pub use types::{
    ApprovalReport, CheckReason, DirectoryCheck, EngineOptions, Verdict, APPROVED, NOT_APPROVED,
};
pub use validate::ApprovalEngine;
