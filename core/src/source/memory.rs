use std::collections::{BTreeMap, BTreeSet};

use crate::dir_id::DirId;
use crate::error::SourceError;

use super::r#trait::DeclarationSource;

/// Declarations held in memory. Directories come into existence as soon as
/// any declaration or explicit `with_dir` call mentions them (ancestors included).
#[derive(Debug, Default, Clone)]
pub struct MemoryDeclarationSource {
    dirs: BTreeSet<DirId>,
    owners: BTreeMap<DirId, Vec<String>>,
    dependencies: BTreeMap<DirId, Vec<String>>,
}

impl MemoryDeclarationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, dir: &str) -> Self {
        self.add_dir(&DirId::new(dir));
        self
    }

    pub fn with_owners(mut self, dir: &str, owners: &[&str]) -> Self {
        let id = DirId::new(dir);
        self.add_dir(&id);
        self.owners
            .insert(id, owners.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_dependencies(mut self, dir: &str, targets: &[&str]) -> Self {
        let id = DirId::new(dir);
        self.add_dir(&id);
        self.dependencies
            .insert(id, targets.iter().map(|s| s.to_string()).collect());
        self
    }

    fn add_dir(&mut self, dir: &DirId) {
        for ancestor in dir.ancestors() {
            if !self.dirs.insert(ancestor) {
                break;
            }
        }
    }
}

impl DeclarationSource for MemoryDeclarationSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn owners(&self, dir: &DirId) -> Result<Option<Vec<String>>, SourceError> {
        Ok(self.owners.get(dir).cloned())
    }

    fn dependencies(&self, dir: &DirId) -> Result<Option<Vec<String>>, SourceError> {
        Ok(self.dependencies.get(dir).cloned())
    }

    fn directories(&self, root: &DirId) -> Result<Vec<DirId>, SourceError> {
        Ok(self
            .dirs
            .iter()
            .filter(|d| d.starts_with(root))
            .cloned()
            .collect())
    }
}
