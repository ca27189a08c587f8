use approvals_core::api::{
    AppConfig, ApprovalEngine, ApproverSet, CliError, DependencyIndex, DirId, EngineOptions,
    OwnershipResolver,
};
use approvals_core::{config, report};
use approvals_plugins::build_source;

use crate::commands::cli::{Args, Commands, OutputFormat};
use crate::logging::init_logging;

/// What a command prints on stdout and the process exit code.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: i32,
}

pub fn run_app(args: Args) -> Result<i32, CliError> {
    let cfg = load_config(&args)?;
    let _guard = init_logging(&cfg.logging).map_err(|e| CliError::Logging(format!("{e:#}")))?;
    tracing::debug!(repo_root = %cfg.repo_root, dependency_root = %cfg.dependency_root, "config loaded");

    let out = dispatch(&cfg, &args)?;
    print!("{}", out.stdout);
    Ok(out.exit_code)
}

/// Config file (or defaults), then environment, then command-line flags.
pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    let mut cfg = match &args.config {
        Some(path) => config::load_from(path)?,
        None => config::load_default()?,
    };
    if let Some(root) = &args.repo_root {
        cfg.repo_root = config::load::expand_path(root)?;
    }
    if let Some(dep_root) = &args.dependency_root {
        cfg.dependency_root = dep_root.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

pub fn dispatch(cfg: &AppConfig, args: &Args) -> Result<CommandOutput, CliError> {
    match &args.command {
        None => validate(cfg, args),
        Some(Commands::Owners(dir_args)) => owners(cfg, &DirId::new(&dir_args.dir), args.format),
        Some(Commands::Dependents(dir_args)) => {
            dependents(cfg, &DirId::new(&dir_args.dir), args.format)
        }
    }
}

fn validate(cfg: &AppConfig, args: &Args) -> Result<CommandOutput, CliError> {
    let source = build_source(cfg);
    let engine = ApprovalEngine::new(
        source.as_ref(),
        EngineOptions {
            dependency_root: cfg.dependency_root_id(),
        },
    );
    let approvers = ApproverSet::new(&args.approvers);
    let result = engine.validate(&approvers, &args.changed_files)?;

    let stdout = match args.format {
        OutputFormat::Text => report::format_text(&result, args.verbose),
        OutputFormat::Json => to_json(&report::build_report(&result))?,
    };
    Ok(CommandOutput {
        stdout,
        exit_code: result.verdict.exit_code(),
    })
}

fn owners(cfg: &AppConfig, dir: &DirId, format: OutputFormat) -> Result<CommandOutput, CliError> {
    let source = build_source(cfg);
    let effective = OwnershipResolver::new(source.as_ref()).effective_owners(dir)?;

    let stdout = match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "directory": effective.directory.to_string(),
            "declared_at": effective.declared_at.as_ref().map(|d| d.to_string()),
            "owners": effective.owners,
        }))?,
        OutputFormat::Text => match &effective.declared_at {
            None => format!("{dir}: unrestricted (no ownership declaration up to root)\n"),
            Some(at) => {
                let mut s = format!("{dir}: owners declared at {at}\n");
                for owner in &effective.owners {
                    s.push_str(&format!("  {owner}\n"));
                }
                s
            }
        },
    };
    Ok(CommandOutput {
        stdout,
        exit_code: 0,
    })
}

fn dependents(
    cfg: &AppConfig,
    dir: &DirId,
    format: OutputFormat,
) -> Result<CommandOutput, CliError> {
    let source = build_source(cfg);
    let index = DependencyIndex::build(source.as_ref(), &cfg.dependency_root_id())?;
    let closure = index.closure(dir);

    let stdout = match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "directory": dir.to_string(),
            "direct": index.dependents_of(dir).iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            "transitive": closure.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
        }))?,
        OutputFormat::Text => closure.iter().map(|d| format!("{d}\n")).collect(),
    };
    Ok(CommandOutput {
        stdout,
        exit_code: 0,
    })
}

fn to_json(value: &serde_json::Value) -> Result<String, CliError> {
    let mut s = serde_json::to_string_pretty(value).map_err(|e| CliError::Render(e.to_string()))?;
    s.push('\n');
    Ok(s)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;

    fn repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/x")).unwrap();
        fs::create_dir_all(root.join("src/y")).unwrap();
        fs::write(root.join("src/x/OWNERS"), "alice\n").unwrap();
        fs::write(root.join("src/y/OWNERS"), "carol\n").unwrap();
        fs::write(root.join("src/y/DEPENDENCIES"), "src/x\n").unwrap();
        dir
    }

    fn run(root: &std::path::Path, argv: &[&str]) -> CommandOutput {
        let root = root.display().to_string();
        let mut full = vec!["validate_approvals", "--repo-root", root.as_str()];
        full.extend_from_slice(argv);
        let args = Args::try_parse_from(full).unwrap();
        let cfg = AppConfig {
            repo_root: root,
            ..AppConfig::default()
        };
        dispatch(&cfg, &args).unwrap()
    }

    #[test]
    fn test_validate_prints_canonical_verdicts() {
        let dir = repo();
        let out = run(
            dir.path(),
            &["--approvers", "alice", "--changed-files", "src/x/file.txt"],
        );
        assert_eq!(out.stdout, "Insufficient Approvals\n");
        assert_eq!(out.exit_code, 1);

        let out = run(
            dir.path(),
            &["--approvers", "alice", "carol", "--changed-files", "src/x/file.txt"],
        );
        assert_eq!(out.stdout, "Approved\n");
        assert_eq!(out.exit_code, 0);
    }

    #[test]
    fn test_validate_json_output() {
        let dir = repo();
        let out = run(
            dir.path(),
            &["--format", "json", "--approvers", "alice", "--changed-files", "src/x/a"],
        );
        let v: serde_json::Value = serde_json::from_str(&out.stdout).unwrap();
        assert_eq!(v["verdict"], "Insufficient Approvals");
        assert_eq!(v["blocked_by"]["directory"], "src/y");
    }

    #[test]
    fn test_path_outside_root_is_fatal() {
        let dir = repo();
        let root = dir.path().display().to_string();
        let args = Args::try_parse_from([
            "validate_approvals",
            "--approvers",
            "alice",
            "--changed-files",
            "../x/file.txt",
        ])
        .unwrap();
        let cfg = AppConfig {
            repo_root: root,
            ..AppConfig::default()
        };
        let err = dispatch(&cfg, &args).unwrap_err();
        assert!(matches!(
            err,
            CliError::Approval(approvals_core::api::ApprovalError::PathOutsideRoot(_))
        ));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_owners_subcommand() {
        let dir = repo();
        let out = run(dir.path(), &["owners", "--dir", "src/x/sub"]);
        assert_eq!(out.stdout, "src/x/sub: owners declared at src/x\n  alice\n");

        let out = run(dir.path(), &["owners", "--dir", "docs"]);
        assert!(out.stdout.contains("unrestricted"));
    }

    #[test]
    fn test_dependents_subcommand() {
        let dir = repo();
        let out = run(dir.path(), &["dependents", "--dir", "src/x"]);
        assert_eq!(out.stdout, "src/y\n");
        let out = run(dir.path(), &["dependents", "--dir", "src/y"]);
        assert_eq!(out.stdout, "");
    }
}
