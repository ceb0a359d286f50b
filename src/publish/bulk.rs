//! Bulk publisher: one tree, one commit, one ref move.
//!
//! Protocol, in order: resolve the branch head (tolerating a missing ref or
//! empty repository), fetch the base tree, upload every file as a blob,
//! build a tree layered on the base, create a commit, and move or create the
//! branch reference. Per-file failures are logged and skipped; everything
//! else aborts the run.

use std::path::{Path, PathBuf};

use crate::github::{GitData, TreeEntry};
use crate::types::BranchName;

use super::{read_encoded, tree_path, PublishError, PublishReport, BULK_COMMIT_MESSAGE};

pub async fn publish_bulk<A: GitData>(
    api: &A,
    branch: &BranchName,
    root: &Path,
    files: &[PathBuf],
) -> Result<PublishReport, PublishError> {
    let base_commit = match api.branch_head(branch).await {
        Ok(sha) => Some(sha),
        Err(err) if err.is_missing_ref() => {
            tracing::info!(%branch, "branch or repository not found; preparing first commit");
            None
        }
        Err(err) => return Err(err.into()),
    };

    // Layering on the base tree gives overlay semantics: paths absent from
    // this run survive, nothing is ever deleted. A missing commit object
    // keeps the parent but rebuilds the tree from scratch.
    let base_tree = match &base_commit {
        Some(commit) => match api.commit_tree(commit).await {
            Ok(sha) => Some(sha),
            Err(err) if err.is_missing_ref() => None,
            Err(err) => return Err(err.into()),
        },
        None => None,
    };

    let mut report = PublishReport {
        discovered: files.len(),
        uploaded: 0,
    };
    let mut entries = Vec::new();

    for file in files {
        let encoded = match read_encoded(root, file) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(path = %file.display(), "failed to read file, skipping: {err}");
                continue;
            }
        };

        match api.create_blob(&encoded).await {
            Ok(sha) => {
                entries.push(TreeEntry::blob(tree_path(file), sha));
                report.uploaded += 1;
                if report.uploaded % 10 == 0 {
                    tracing::info!("uploaded {}/{} files", report.uploaded, report.discovered);
                }
            }
            Err(err) => {
                tracing::warn!(path = %file.display(), "failed to upload blob, skipping: {err}");
            }
        }
    }

    if entries.is_empty() {
        return Err(PublishError::NothingToPublish);
    }

    tracing::info!(blobs = entries.len(), "creating tree");
    let tree = api.create_tree(&entries, base_tree.as_ref()).await?;

    let commit = api
        .create_commit(BULK_COMMIT_MESSAGE, &tree, base_commit.as_ref())
        .await?;

    match &base_commit {
        Some(_) => api.update_branch(branch, &commit).await?,
        None => api.create_branch(branch, &commit).await?,
    }

    tracing::info!(commit = %commit.short(), %branch, "branch updated");
    Ok(report)
}
