//! Repo-relative directory identifiers.
//!
//! A `DirId` is the unit of ownership and dependency. The tree root is the
//! empty identifier; every other identifier is a `/`-joined list of
//! components with no empty, `.` or resolvable `..` segments.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirId(String);

impl DirId {
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Normalizes `raw` into an identifier.
    ///
    /// Never fails: a `..` that climbs above the root is kept as a literal
    /// component, which makes the identifier escaping (see [`is_escaping`]).
    ///
    /// [`is_escaping`]: DirId::is_escaping
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().replace('\\', "/");
        let mut parts: Vec<&str> = Vec::new();
        for part in raw.split('/') {
            match part {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(last) if *last != ".." => {
                        parts.pop();
                    }
                    _ => parts.push(".."),
                },
                other => parts.push(other),
            }
        }
        Self(parts.join("/"))
    }

    /// Directory that contains the changed file at `file`. A path ending in
    /// a separator names the directory itself.
    pub fn containing(file: &str) -> Self {
        let raw = file.trim();
        if raw.ends_with('/') || raw.ends_with('\\') {
            return DirId::new(raw);
        }
        DirId::new(raw).parent().unwrap_or_else(DirId::root)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_escaping(&self) -> bool {
        self.components().next() == Some("..")
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|c| !c.is_empty())
    }

    pub fn depth(&self) -> usize {
        self.components().count()
    }

    pub fn parent(&self) -> Option<DirId> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => Some(Self::root()),
        }
    }

    /// Self first, then each parent, ending with the root.
    pub fn ancestors(&self) -> Ancestors {
        Ancestors {
            next: Some(self.clone()),
        }
    }

    pub fn join(&self, child: &str) -> DirId {
        if self.is_root() {
            DirId::new(child)
        } else {
            DirId::new(&format!("{}/{}", self.0, child))
        }
    }

    pub fn starts_with(&self, prefix: &DirId) -> bool {
        prefix.is_root()
            || self.0 == prefix.0
            || (self.0.starts_with(&prefix.0) && self.0[prefix.0.len()..].starts_with('/'))
    }
}

impl fmt::Display for DirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<&str> for DirId {
    fn from(raw: &str) -> Self {
        DirId::new(raw)
    }
}

pub struct Ancestors {
    next: Option<DirId>,
}

impl Iterator for Ancestors {
    type Item = DirId;

    fn next(&mut self) -> Option<DirId> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
