use crate::dir_id::DirId;
use crate::error::SourceError;

/// Read-only view of the per-directory declarations in one tree.
///
/// `Ok(None)` means "no declaration here". Errors are reserved for failures
/// that prevent resolution from completing (permissions, I/O).
pub trait DeclarationSource: Send + Sync {
    fn name(&self) -> &str;

    /// Approver identifiers declared for exactly `dir`, in file order.
    fn owners(&self, dir: &DirId) -> Result<Option<Vec<String>>, SourceError>;

    /// Raw dependency targets declared by exactly `dir`, in file order.
    fn dependencies(&self, dir: &DirId) -> Result<Option<Vec<String>>, SourceError>;

    /// Every directory under `root`, `root` included, in a stable order.
    /// A `root` that does not exist yields an empty list.
    fn directories(&self, root: &DirId) -> Result<Vec<DirId>, SourceError>;
}
