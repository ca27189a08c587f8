//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `approvals_core::api` instead of reaching into internal modules.

pub use crate::config::{
    AppConfig, DeclarationsConfig, DeclarationsProvider, FsDeclarationsConfig, LoggingConfig,
};
pub use crate::deps::DependencyIndex;
pub use crate::dir_id::DirId;
pub use crate::engine::{
    ApprovalEngine, ApprovalReport, CheckReason, DirectoryCheck, EngineOptions, Verdict,
};
pub use crate::error::{ApprovalError, CliError, ConfigError, SourceError};
pub use crate::owners::{ApproverSet, EffectiveOwners, OwnerResolution, OwnershipResolver};
pub use crate::source::{parse_declaration, DeclarationSource, MemoryDeclarationSource};
