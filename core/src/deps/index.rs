use std::collections::{BTreeMap, HashSet};

use crate::dir_id::DirId;
use crate::error::SourceError;
use crate::source::DeclarationSource;

/// Reverse dependency index: target directory -> directories that declared a
/// dependency on it.
#[derive(Debug, Default, Clone)]
pub struct DependencyIndex {
    dependents: BTreeMap<DirId, Vec<DirId>>,
}

impl DependencyIndex {
    /// Scans every directory under `scan_root` once and inverts its
    /// dependency declarations.
    pub fn build(source: &dyn DeclarationSource, scan_root: &DirId) -> Result<Self, SourceError> {
        let mut index = Self::default();
        let mut declaring = 0usize;

        for dir in source.directories(scan_root)? {
            let Some(targets) = source.dependencies(&dir)? else {
                continue;
            };
            declaring += 1;
            tracing::debug!(dir = %dir, targets = targets.len(), "dependency declaration");
            for target in targets.iter().filter(|t| !t.trim().is_empty()) {
                index.insert(DirId::new(target), dir.clone());
            }
        }

        tracing::info!(
            source = source.name(),
            scan_root = %scan_root,
            declaring,
            targets = index.len(),
            "built reverse dependency index"
        );
        Ok(index)
    }

    fn insert(&mut self, target: DirId, dependent: DirId) {
        let entry = self.dependents.entry(target).or_default();
        if !entry.contains(&dependent) {
            entry.push(dependent);
        }
    }

    /// Directories that directly declared a dependency on `dir`.
    pub fn dependents_of(&self, dir: &DirId) -> &[DirId] {
        self.dependents.get(dir).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every directory transitively dependent on `dir`, `dir` itself
    /// excluded, in depth-first pre-order. Cycles are cut at the first
    /// revisit.
    pub fn closure(&self, dir: &DirId) -> Vec<DirId> {
        let mut seen: HashSet<&DirId> = HashSet::new();
        seen.insert(dir);
        let mut out = Vec::new();
        let mut stack: Vec<&DirId> = self.dependents_of(dir).iter().rev().collect();

        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            out.push(next.clone());
            stack.extend(self.dependents_of(next).iter().rev());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.dependents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DirId, &[DirId])> {
        self.dependents.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
