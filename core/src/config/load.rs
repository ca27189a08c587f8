use std::path::Path;

use crate::error::ConfigError;

use super::types::AppConfig;

pub const DEFAULT_CONFIG_FILE: &str = "approvals.toml";

/// Loads `approvals.toml` from the working directory when present, otherwise
/// defaults, then applies environment overrides.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let cfg = if Path::new(DEFAULT_CONFIG_FILE).exists() {
        read_config(Path::new(DEFAULT_CONFIG_FILE))?
    } else {
        AppConfig::default()
    };
    finish(cfg)
}

/// Like [`load_default`] but the file must exist.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    finish(read_config(path)?)
}

pub fn parse_str(s: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str::<AppConfig>(s).map_err(ConfigError::Parse)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_str(&s)
}

fn finish(mut cfg: AppConfig) -> Result<AppConfig, ConfigError> {
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    cfg.repo_root = expand_path(&cfg.repo_root)?;
    cfg.validate()?;
    Ok(cfg)
}

pub fn apply_env_overrides(cfg: &mut AppConfig, get: impl Fn(&str) -> Option<String>) {
    if let Some(v) = get("APPROVALS_REPO_ROOT") {
        if !v.trim().is_empty() {
            cfg.repo_root = v;
        }
    }
    if let Some(v) = get("APPROVALS_DEPENDENCY_ROOT") {
        if !v.trim().is_empty() {
            cfg.dependency_root = v;
        }
    }
    if let Some(v) = get("APPROVALS_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v;
        }
    }
}

/// Expands `~` and `$VAR` in a configured path.
pub fn expand_path(raw: &str) -> Result<String, ConfigError> {
    shellexpand::full(raw)
        .map(|s| s.into_owned())
        .map_err(|e| ConfigError::EnvInvalid {
            key: e.var_name.clone(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::DeclarationsProvider;

    #[test]
    fn test_empty_file_yields_defaults() {
        let cfg = parse_str("").unwrap();
        assert_eq!(cfg.repo_root, ".");
        assert_eq!(cfg.dependency_root, "");
        let DeclarationsProvider::Filesystem(fs_cfg) = cfg.declarations.provider;
        assert_eq!(fs_cfg.owners_file, "OWNERS");
        assert_eq!(fs_cfg.dependencies_file, "DEPENDENCIES");
        assert_eq!(fs_cfg.ignore_dirs, vec![".git".to_string()]);
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn test_parse_full_file() {
        let cfg = parse_str(
            r#"
repo_root = "repo_root"
dependency_root = "src/com/twitter"

[declarations]
provider = "filesystem"
owners_file = "CODEOWNERS"
ignore_dirs = [".git", "target"]

[logging]
level = "debug"
file = "approvals.log"
"#,
        )
        .unwrap();
        assert_eq!(cfg.repo_root, "repo_root");
        assert_eq!(cfg.dependency_root_id().as_str(), "src/com/twitter");
        let DeclarationsProvider::Filesystem(ref fs_cfg) = cfg.declarations.provider;
        assert_eq!(fs_cfg.owners_file, "CODEOWNERS");
        assert_eq!(fs_cfg.dependencies_file, "DEPENDENCIES");
        assert_eq!(fs_cfg.ignore_dirs.len(), 2);
        assert_eq!(cfg.logging.file.as_deref(), Some("approvals.log"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let err = parse_str("[declarations]\nprovider = \"http\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides_skip_blank_values() {
        let env: HashMap<&str, &str> = [
            ("APPROVALS_REPO_ROOT", "/srv/repo"),
            ("APPROVALS_DEPENDENCY_ROOT", "   "),
            ("APPROVALS_LOG_LEVEL", "trace"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.repo_root, "/srv/repo");
        assert_eq!(cfg.dependency_root, "");
        assert_eq!(cfg.logging.level, "trace");
    }

    #[test]
    fn test_validation_rejects_bad_file_names() {
        let mut cfg = parse_str("[declarations]\nprovider = \"filesystem\"\nowners_file = \"a/OWNERS\"\n")
            .unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

        cfg = parse_str("[declarations]\nprovider = \"filesystem\"\ndependencies_file = \"OWNERS\"\n")
            .unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

        cfg = parse_str("dependency_root = \"../elsewhere\"\n").unwrap();
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("approvals.toml");
        std::fs::write(&path, "repo_root = \"checkout\"\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert!(cfg.repo_root.ends_with("checkout"));
    }
}
