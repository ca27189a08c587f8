use std::collections::HashSet;

use crate::deps::DependencyIndex;
use crate::dir_id::DirId;
use crate::error::ApprovalError;
use crate::owners::{ApproverSet, OwnershipResolver};
use crate::source::DeclarationSource;

use super::types::{ApprovalReport, CheckReason, DirectoryCheck, EngineOptions, Verdict};

pub struct ApprovalEngine<'a> {
    source: &'a dyn DeclarationSource,
    options: EngineOptions,
}

impl<'a> ApprovalEngine<'a> {
    pub fn new(source: &'a dyn DeclarationSource, options: EngineOptions) -> Self {
        Self { source, options }
    }

    /// Decides whether `changed_files` carry enough approval.
    ///
    /// Every changed directory and every directory transitively dependent on
    /// it must be authorized by `approvers`. The dependency index is rebuilt
    /// on each call. Each directory is checked at most once per request, which
    /// also cuts dependency cycles.
    pub fn validate(
        &self,
        approvers: &ApproverSet,
        changed_files: &[String],
    ) -> Result<ApprovalReport, ApprovalError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("validate", request_id = %request_id);
        let _enter = span.enter();

        let changed: Vec<(String, DirId)> = changed_files
            .iter()
            .map(|file| {
                let dir = DirId::containing(file);
                if dir.is_escaping() {
                    return Err(ApprovalError::PathOutsideRoot(file.clone()));
                }
                Ok((file.clone(), dir))
            })
            .collect::<Result<_, _>>()?;

        let index = DependencyIndex::build(self.source, &self.options.dependency_root)?;
        let resolver = OwnershipResolver::new(self.source);

        let mut visited: HashSet<DirId> = HashSet::new();
        let mut checks = Vec::new();

        for (file, dir) in changed {
            let mut stack = vec![(dir, CheckReason::Changed { file })];

            while let Some((dir, reason)) = stack.pop() {
                if !visited.insert(dir.clone()) {
                    continue;
                }

                let resolution = resolver.resolve(approvers, &dir)?;
                let check = DirectoryCheck {
                    directory: dir.clone(),
                    reason,
                    resolution,
                };

                if !check.resolution.authorized {
                    tracing::info!(
                        dir = %check.directory,
                        owners = ?check.resolution.owners,
                        "insufficient approvals"
                    );
                    checks.push(check.clone());
                    return Ok(ApprovalReport {
                        request_id,
                        verdict: Verdict::Insufficient,
                        checks,
                        blocked_by: Some(check),
                    });
                }
                checks.push(check);

                for dependent in index.dependents_of(&dir).iter().rev() {
                    if visited.contains(dependent) {
                        continue;
                    }
                    stack.push((
                        dependent.clone(),
                        CheckReason::DependentOf {
                            directory: dir.clone(),
                        },
                    ));
                }
            }
        }

        tracing::info!(checked = checks.len(), "approved");
        Ok(ApprovalReport {
            request_id,
            verdict: Verdict::Approved,
            checks,
            blocked_by: None,
        })
    }
}
