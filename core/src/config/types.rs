use serde::{Deserialize, Serialize};

use crate::dir_id::DirId;
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory that changed file paths and declarations are relative to.
    #[serde(default = "default_repo_root")]
    pub repo_root: String,

    /// Subtree scanned for dependency declarations.
    #[serde(default)]
    pub dependency_root: String,

    #[serde(default)]
    pub declarations: DeclarationsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_repo_root() -> String {
    ".".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repo_root: default_repo_root(),
            dependency_root: String::new(),
            declarations: DeclarationsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn dependency_root_id(&self) -> DirId {
        DirId::new(&self.dependency_root)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repo_root.trim().is_empty() {
            return Err(ConfigError::Validation("repo_root must not be empty".into()));
        }
        if self.dependency_root_id().is_escaping() {
            return Err(ConfigError::Validation(format!(
                "dependency_root escapes the repository: {}",
                self.dependency_root
            )));
        }
        let DeclarationsProvider::Filesystem(ref fs_cfg) = self.declarations.provider;
        check_file_name("owners_file", &fs_cfg.owners_file)?;
        check_file_name("dependencies_file", &fs_cfg.dependencies_file)?;
        if fs_cfg.owners_file == fs_cfg.dependencies_file {
            return Err(ConfigError::Validation(
                "owners_file and dependencies_file must differ".into(),
            ));
        }
        Ok(())
    }
}

fn check_file_name(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} must not be empty")));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "{field} must be a plain file name, got {name:?}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationsConfig {
    #[serde(default = "default_declarations_provider")]
    #[serde(flatten)]
    pub provider: DeclarationsProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum DeclarationsProvider {
    #[serde(rename = "filesystem")]
    Filesystem(FsDeclarationsConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsDeclarationsConfig {
    #[serde(default = "default_owners_file")]
    pub owners_file: String,

    #[serde(default = "default_dependencies_file")]
    pub dependencies_file: String,

    /// Directory names never descended into while scanning for declarations.
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
}

fn default_declarations_provider() -> DeclarationsProvider {
    DeclarationsProvider::Filesystem(FsDeclarationsConfig::default())
}

fn default_owners_file() -> String {
    "OWNERS".to_string()
}

fn default_dependencies_file() -> String {
    "DEPENDENCIES".to_string()
}

fn default_ignore_dirs() -> Vec<String> {
    vec![".git".to_string()]
}

impl Default for FsDeclarationsConfig {
    fn default() -> Self {
        Self {
            owners_file: default_owners_file(),
            dependencies_file: default_dependencies_file(),
            ignore_dirs: default_ignore_dirs(),
        }
    }
}

impl Default for DeclarationsConfig {
    fn default() -> Self {
        Self {
            provider: default_declarations_provider(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write logs to this file (appended, non-blocking).
    #[serde(default)]
    pub file: Option<String>,

    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            ansi: default_ansi(),
        }
    }
}
