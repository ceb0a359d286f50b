//! Publishing a local directory to a remote branch.
//!
//! The two strategies share their scaffolding (credential acquisition, file
//! enumeration, reading and base64-encoding content, progress logging) and
//! differ only in the API protocol:
//!
//! - [`Strategy::Bulk`] creates blobs, builds one tree and one commit, and
//!   moves the branch reference once. Atomic at the git-object level.
//! - [`Strategy::Contents`] issues one create-or-update-contents call per
//!   file, each producing its own commit. No atomicity across files.

mod bulk;
mod contents;

pub use bulk::publish_bulk;
pub use contents::publish_contents;

use std::io;
use std::path::Path;

use base64::Engine as _;
use clap::ValueEnum;
use thiserror::Error;

use crate::connector::{ConnectorError, TokenBroker, TokenProvider};
use crate::github::{ApiError, GithubClient};
use crate::scan;
use crate::types::{BranchName, RepoId};

/// Commit message for the bulk strategy's single commit.
pub const BULK_COMMIT_MESSAGE: &str = "Automated publish";

/// Which API protocol to use for a publish run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// One tree, one commit, one ref move.
    Bulk,
    /// One create-or-update-contents call (and commit) per file.
    Contents,
}

/// Outcome of a publish run. Advisory only; nothing persists it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishReport {
    /// How many files the enumerator found.
    pub discovered: usize,

    /// How many of them were successfully uploaded.
    pub uploaded: usize,
}

impl PublishReport {
    /// True when every discovered file made it to the remote.
    pub fn complete(&self) -> bool {
        self.uploaded == self.discovered
    }
}

/// Fatal publish failures. Per-file problems are logged and skipped instead.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Bulk only: every file failed to read or upload, so there is nothing
    /// meaningful to commit.
    #[error("no file could be uploaded; nothing to commit")]
    NothingToPublish,
}

/// Publishes `root` to `branch` of `repo` using the given strategy.
///
/// Acquires a credential through the provider, builds a repo-scoped client,
/// enumerates the local files, and hands off to the selected strategy.
pub async fn publish<B: TokenBroker>(
    strategy: Strategy,
    provider: &mut TokenProvider<B>,
    repo: RepoId,
    branch: &BranchName,
    root: &Path,
) -> Result<PublishReport, PublishError> {
    tracing::info!(%repo, %branch, "connecting to GitHub");
    let token = provider.access_token().await?;
    let client = GithubClient::from_token(token, repo).map_err(ApiError::from_octocrab)?;

    let files = scan::list_files(root);
    tracing::info!(count = files.len(), "enumerated local files");

    match strategy {
        Strategy::Bulk => publish_bulk(&client, branch, root, &files).await,
        Strategy::Contents => publish_contents(&client, branch, root, &files).await,
    }
}

/// Reads one local file and base64-encodes its bytes for upload.
fn read_encoded(root: &Path, relative: &Path) -> io::Result<String> {
    let bytes = std::fs::read(root.join(relative))?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Renders a relative path the way the remote tree expects it:
/// forward-slash separated, no leading separator.
fn tree_path(relative: &Path) -> String {
    let segments: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    segments.join("/")
}
