use crate::dir_id::DirId;
use crate::error::SourceError;
use crate::source::DeclarationSource;

use super::types::{ApproverSet, EffectiveOwners, OwnerResolution};

pub struct OwnershipResolver<'a> {
    source: &'a dyn DeclarationSource,
}

impl<'a> OwnershipResolver<'a> {
    pub fn new(source: &'a dyn DeclarationSource) -> Self {
        Self { source }
    }

    /// Finds the nearest ownership declaration at or above `dir`.
    ///
    /// A declaration with no lines at all counts as absent. One with lines
    /// but no usable identifier is terminal and authorizes nobody. The walk
    /// is bounded by the depth of `dir`.
    pub fn effective_owners(&self, dir: &DirId) -> Result<EffectiveOwners, SourceError> {
        for level in dir.ancestors() {
            let Some(declared) = self.source.owners(&level)? else {
                continue;
            };
            if declared.is_empty() {
                tracing::debug!(dir = %level, "empty ownership declaration, continuing upward");
                continue;
            }
            let owners: Vec<String> = declared
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            return Ok(EffectiveOwners {
                directory: dir.clone(),
                declared_at: Some(level),
                owners,
            });
        }
        Ok(EffectiveOwners {
            directory: dir.clone(),
            declared_at: None,
            owners: Vec::new(),
        })
    }

    /// True iff the change at `dir` is authorized by `approvers`.
    ///
    /// The nearest declaration is terminal even when nobody in it approved.
    pub fn resolve(
        &self,
        approvers: &ApproverSet,
        dir: &DirId,
    ) -> Result<OwnerResolution, SourceError> {
        let effective = self.effective_owners(dir)?;

        let Some(declared_at) = effective.declared_at else {
            tracing::debug!(dir = %dir, "no ownership declaration up to root, unrestricted");
            return Ok(OwnerResolution {
                directory: effective.directory,
                declared_at: None,
                owners: Vec::new(),
                matched: Vec::new(),
                authorized: true,
            });
        };

        let matched: Vec<String> = effective
            .owners
            .iter()
            .filter(|o| approvers.contains(o))
            .cloned()
            .collect();
        let authorized = !matched.is_empty();
        tracing::debug!(
            dir = %dir,
            declared_at = %declared_at,
            authorized,
            "resolved ownership"
        );

        Ok(OwnerResolution {
            directory: effective.directory,
            declared_at: Some(declared_at),
            owners: effective.owners,
            matched,
            authorized,
        })
    }
}
