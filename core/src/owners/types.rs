use std::collections::BTreeSet;

use serde::Serialize;

use crate::dir_id::DirId;

/// Identifiers that approved one request. Entries are trimmed; blanks dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApproverSet(BTreeSet<String>);

impl ApproverSet {
    pub fn new<I, S>(approvers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            approvers
                .into_iter()
                .map(|a| a.as_ref().trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        )
    }

    pub fn contains(&self, approver: &str) -> bool {
        self.0.contains(approver)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Outcome of resolving ownership for one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerResolution {
    pub directory: DirId,
    /// Nearest directory (self or ancestor) with a declaration. `None` when
    /// the walk left the tree without finding one.
    pub declared_at: Option<DirId>,
    pub owners: Vec<String>,
    /// Owners present in the approver set.
    pub matched: Vec<String>,
    pub authorized: bool,
}

impl OwnerResolution {
    pub fn is_unrestricted(&self) -> bool {
        self.declared_at.is_none()
    }
}

/// The declaration that governs a directory, without any approver matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveOwners {
    pub directory: DirId,
    pub declared_at: Option<DirId>,
    pub owners: Vec<String>,
}
