use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Validates that the correct people have approved changes to a set of files.
#[derive(Parser, Debug, Clone)]
#[command(name = "validate_approvals", version, subcommand_negates_reqs = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Approver identifiers, separated by spaces.
    #[arg(long, required = true, num_args = 0..)]
    pub approvers: Vec<String>,

    /// Paths of modified files, relative to the repository root.
    #[arg(long = "changed-files", required = true, num_args = 0..)]
    pub changed_files: Vec<String>,

    /// Config file (defaults to ./approvals.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository root; overrides config and APPROVALS_REPO_ROOT.
    #[arg(long, global = true)]
    pub repo_root: Option<String>,

    /// Subtree scanned for dependency declarations.
    #[arg(long, global = true)]
    pub dependency_root: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Explain every directory that was checked.
    #[arg(long, short, default_value_t = false, global = true)]
    pub verbose: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DirArgs {
    /// Directory, relative to the repository root.
    #[arg(long)]
    pub dir: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the ownership declaration that governs a directory.
    Owners(DirArgs),
    /// List every directory transitively dependent on a directory.
    Dependents(DirArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_original_flags() {
        let args = Args::try_parse_from([
            "validate_approvals",
            "--approvers",
            "alice",
            "bob",
            "--changed-files",
            "src/x/a.txt",
            "src/y/b.txt",
        ])
        .unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.approvers, vec!["alice", "bob"]);
        assert_eq!(args.changed_files, vec!["src/x/a.txt", "src/y/b.txt"]);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_empty_approver_list_is_allowed() {
        let args =
            Args::try_parse_from(["validate_approvals", "--approvers", "--changed-files", "a/b"])
                .unwrap();
        assert!(args.approvers.is_empty());
        assert_eq!(args.changed_files, vec!["a/b"]);
    }

    #[test]
    fn test_flags_are_required_without_subcommand() {
        assert!(Args::try_parse_from(["validate_approvals", "--approvers", "alice"]).is_err());
    }

    #[test]
    fn test_subcommand_with_global_flags() {
        let args = Args::try_parse_from([
            "validate_approvals",
            "owners",
            "--dir",
            "src/x",
            "--repo-root",
            "/tmp/repo",
            "--format",
            "json",
        ])
        .unwrap();
        match args.command {
            Some(Commands::Owners(ref d)) => assert_eq!(d.dir, "src/x"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(args.repo_root.as_deref(), Some("/tmp/repo"));
        assert_eq!(args.format, OutputFormat::Json);
    }
}
