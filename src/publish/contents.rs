//! Per-file publisher: one create-or-update-contents call per file.
//!
//! No branch/tree/commit orchestration: the remote performs the
//! create-or-update and its commit implicitly, once per file. A failed file
//! is logged and skipped, so a partial run leaves some files updated and
//! others untouched.

use std::path::{Path, PathBuf};

use crate::github::GitData;
use crate::types::BranchName;

use super::{read_encoded, tree_path, PublishError, PublishReport};

pub async fn publish_contents<A: GitData>(
    api: &A,
    branch: &BranchName,
    root: &Path,
    files: &[PathBuf],
) -> Result<PublishReport, PublishError> {
    let mut report = PublishReport {
        discovered: files.len(),
        uploaded: 0,
    };

    for file in files {
        let encoded = match read_encoded(root, file) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(path = %file.display(), "failed to read file, skipping: {err}");
                continue;
            }
        };

        let path = tree_path(file);
        let message = format!("Add {path}");

        match api.put_file(&path, &message, &encoded, branch).await {
            Ok(()) => {
                report.uploaded += 1;
                if report.uploaded % 5 == 0 || report.uploaded == report.discovered {
                    tracing::info!("uploaded {}/{} files", report.uploaded, report.discovered);
                }
            }
            Err(err) => {
                tracing::warn!(path = %file.display(), "failed to upload file, skipping: {err}");
            }
        }
    }

    tracing::info!(
        "publish finished: {}/{} files uploaded",
        report.uploaded,
        report.discovered
    );
    Ok(report)
}
