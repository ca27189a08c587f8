use std::fmt;

use serde::Serialize;

use crate::dir_id::DirId;
use crate::owners::OwnerResolution;

pub const APPROVED: &str = "Approved";
pub const NOT_APPROVED: &str = "Insufficient Approvals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Approved,
    Insufficient,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Approved => APPROVED,
            Verdict::Insufficient => NOT_APPROVED,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved)
    }

    /// 0 when approved, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Approved => 0,
            Verdict::Insufficient => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a directory ended up in the closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckReason {
    Changed { file: String },
    DependentOf { directory: DirId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryCheck {
    pub directory: DirId,
    pub reason: CheckReason,
    pub resolution: OwnerResolution,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApprovalReport {
    pub request_id: String,
    pub verdict: Verdict,
    /// Directories checked, in evaluation order. Stops at the first failure.
    pub checks: Vec<DirectoryCheck>,
    pub blocked_by: Option<DirectoryCheck>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Subtree scanned for dependency declarations.
    pub dependency_root: DirId,
}
