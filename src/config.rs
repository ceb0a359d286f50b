//! Runtime configuration.
//!
//! The target repository, branch, scan root, and strategy are explicit
//! inputs, supplied on the command line with environment fallbacks for the
//! repository coordinates. The connector broker reads its own environment
//! variables separately (see [`crate::connector`]).

use std::path::PathBuf;

use clap::Parser;

use crate::publish::Strategy;
use crate::types::{BranchName, RepoId};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "repo-publish",
    about = "Publish a local directory tree to a GitHub repository"
)]
pub struct Cli {
    /// Repository owner (user or organization).
    #[arg(long, env = "GITHUB_OWNER")]
    pub owner: String,

    /// Repository name.
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: String,

    /// Branch to publish to.
    #[arg(long, env = "GITHUB_BRANCH", default_value = "main")]
    pub branch: String,

    /// Directory to publish.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Publish strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Bulk)]
    pub strategy: Strategy,
}

/// Resolved configuration for one publish run.
#[derive(Debug, Clone)]
pub struct Config {
    pub repo: RepoId,
    pub branch: BranchName,
    pub root: PathBuf,
    pub strategy: Strategy,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            repo: RepoId::new(cli.owner, cli.repo),
            branch: BranchName::new(cli.branch),
            root: cli.root,
            strategy: cli.strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_invocation() {
        let cli = Cli::try_parse_from([
            "repo-publish",
            "--owner",
            "octocat",
            "--repo",
            "hello-world",
        ])
        .unwrap();
        let config = Config::from(cli);

        assert_eq!(config.repo.to_string(), "octocat/hello-world");
        assert_eq!(config.branch.as_str(), "main");
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.strategy, Strategy::Bulk);
    }

    #[test]
    fn parses_strategy_and_overrides() {
        let cli = Cli::try_parse_from([
            "repo-publish",
            "--owner",
            "octocat",
            "--repo",
            "hello-world",
            "--branch",
            "release",
            "--root",
            "/tmp/site",
            "--strategy",
            "contents",
        ])
        .unwrap();
        let config = Config::from(cli);

        assert_eq!(config.branch.as_str(), "release");
        assert_eq!(config.root, PathBuf::from("/tmp/site"));
        assert_eq!(config.strategy, Strategy::Contents);
    }

    #[test]
    fn owner_and_repo_are_required() {
        assert!(Cli::try_parse_from(["repo-publish"]).is_err());
        assert!(Cli::try_parse_from(["repo-publish", "--owner", "octocat"]).is_err());
    }
}
