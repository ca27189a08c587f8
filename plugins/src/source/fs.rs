use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use approvals_core::api::{parse_declaration, DeclarationSource, DirId, FsDeclarationsConfig, SourceError};
use walkdir::WalkDir;

/// Reads declarations straight from a checkout on disk. Nothing is cached;
/// every call hits the filesystem.
pub struct FsDeclarationSource {
    repo_root: PathBuf,
    owners_file: String,
    dependencies_file: String,
    ignore_dirs: Vec<String>,
}

impl FsDeclarationSource {
    pub fn new(repo_root: impl Into<PathBuf>, config: &FsDeclarationsConfig) -> Self {
        Self {
            repo_root: repo_root.into(),
            owners_file: config.owners_file.clone(),
            dependencies_file: config.dependencies_file.clone(),
            ignore_dirs: config.ignore_dirs.clone(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    fn dir_path(&self, dir: &DirId) -> PathBuf {
        self.repo_root.join(dir.as_str())
    }

    fn read_declaration(&self, dir: &DirId, file: &str) -> Result<Option<Vec<String>>, SourceError> {
        let dir_path = self.dir_path(dir);
        if !dir_path.is_dir() {
            return Ok(None);
        }
        let path = dir_path.join(file);
        match fs::read(&path) {
            Ok(bytes) => {
                tracing::trace!(path = %path.display(), "read declaration");
                Ok(Some(parse_declaration(&String::from_utf8_lossy(&bytes))))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SourceError::Io { path, source }),
        }
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore_dirs.iter().any(|d| d == name)
    }
}

impl DeclarationSource for FsDeclarationSource {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn owners(&self, dir: &DirId) -> Result<Option<Vec<String>>, SourceError> {
        self.read_declaration(dir, &self.owners_file)
    }

    fn dependencies(&self, dir: &DirId) -> Result<Option<Vec<String>>, SourceError> {
        self.read_declaration(dir, &self.dependencies_file)
    }

    fn directories(&self, root: &DirId) -> Result<Vec<DirId>, SourceError> {
        let base = self.dir_path(root);
        if !base.is_dir() {
            tracing::debug!(root = %root, "scan root does not exist");
            return Ok(Vec::new());
        }

        let walker = WalkDir::new(&base)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self.is_ignored(&entry.file_name().to_string_lossy())
            });

        let mut dirs = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| SourceError::Walk {
                root: base.clone(),
                message: e.to_string(),
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&base) else {
                continue;
            };
            dirs.push(root.join(&rel.to_string_lossy()));
        }
        Ok(dirs)
    }
}
