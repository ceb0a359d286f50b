//! The git-data REST surface used by the publishers.
//!
//! Octocrab's typed API doesn't cover the low-level git-data endpoints
//! (blobs, trees, commit objects, refs), so the implementation goes through
//! its generic `get`/`post`/`patch`/`put` helpers with local request and
//! response structs, mirroring how the rest of the API surface is consumed.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::types::{BranchName, Sha};

use super::client::GithubClient;
use super::error::ApiError;

/// One blob's placement in a tree under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    /// Path relative to the repository root, forward-slash separated.
    pub path: String,

    /// Git file mode. Always a regular non-executable file here.
    pub mode: &'static str,

    /// Git object type.
    #[serde(rename = "type")]
    pub kind: &'static str,

    /// The blob's content hash, as returned by blob creation.
    pub sha: Sha,
}

impl TreeEntry {
    /// Creates a regular-file blob entry.
    pub fn blob(path: String, sha: Sha) -> Self {
        TreeEntry {
            path,
            mode: "100644",
            kind: "blob",
            sha,
        }
    }
}

/// The remote git-data operations the publishers depend on.
///
/// Implemented for [`GithubClient`] against the real API and by scripted
/// fakes in the publish tests.
pub trait GitData {
    /// Resolves the commit SHA a branch currently points at.
    fn branch_head(
        &self,
        branch: &BranchName,
    ) -> impl Future<Output = Result<Sha, ApiError>> + Send;

    /// Fetches the tree SHA of a commit object.
    fn commit_tree(&self, commit: &Sha) -> impl Future<Output = Result<Sha, ApiError>> + Send;

    /// Creates a blob from base64-encoded content, returning its SHA.
    fn create_blob(
        &self,
        content_base64: &str,
    ) -> impl Future<Output = Result<Sha, ApiError>> + Send;

    /// Creates a tree from blob entries, layered on `base` when given.
    fn create_tree(
        &self,
        entries: &[TreeEntry],
        base: Option<&Sha>,
    ) -> impl Future<Output = Result<Sha, ApiError>> + Send;

    /// Creates a commit object pointing at `tree`, with zero or one parents.
    fn create_commit(
        &self,
        message: &str,
        tree: &Sha,
        parent: Option<&Sha>,
    ) -> impl Future<Output = Result<Sha, ApiError>> + Send;

    /// Moves an existing branch reference to `commit`.
    fn update_branch(
        &self,
        branch: &BranchName,
        commit: &Sha,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Creates a branch reference pointing at `commit`.
    fn create_branch(
        &self,
        branch: &BranchName,
        commit: &Sha,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Creates or updates one file on `branch` with its own commit.
    fn put_file(
        &self,
        path: &str,
        message: &str,
        content_base64: &str,
        branch: &BranchName,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

// ─── Request / Response Shapes ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: RefObject,
}

#[derive(Debug, Deserialize)]
struct RefObject {
    sha: Sha,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    tree: TreeRef,
}

#[derive(Debug, Deserialize)]
struct TreeRef {
    sha: Sha,
}

#[derive(Debug, Deserialize)]
struct ShaResponse {
    sha: Sha,
}

#[derive(Serialize)]
struct BlobRequest<'a> {
    content: &'a str,
    encoding: &'static str,
}

#[derive(Serialize)]
struct TreeRequest<'a> {
    tree: &'a [TreeEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    base_tree: Option<&'a Sha>,
}

#[derive(Serialize)]
struct CommitRequest<'a> {
    message: &'a str,
    tree: &'a Sha,
    parents: Vec<&'a Sha>,
}

#[derive(Serialize)]
struct UpdateRefRequest<'a> {
    sha: &'a Sha,
}

#[derive(Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    full_ref: String,
    sha: &'a Sha,
}

#[derive(Serialize)]
struct PutFileRequest<'a> {
    message: &'a str,
    content: &'a str,
    branch: &'a str,
}

// ─── Octocrab Implementation ──────────────────────────────────────────────────

impl GitData for GithubClient {
    async fn branch_head(&self, branch: &BranchName) -> Result<Sha, ApiError> {
        let url = format!(
            "/repos/{}/{}/git/ref/{}",
            self.owner(),
            self.repo_name(),
            branch.ref_path()
        );

        let response: RefResponse = self
            .inner()
            .get(&url, None::<&()>)
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(response.object.sha)
    }

    async fn commit_tree(&self, commit: &Sha) -> Result<Sha, ApiError> {
        let url = format!(
            "/repos/{}/{}/git/commits/{}",
            self.owner(),
            self.repo_name(),
            commit
        );

        let response: CommitResponse = self
            .inner()
            .get(&url, None::<&()>)
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(response.tree.sha)
    }

    async fn create_blob(&self, content_base64: &str) -> Result<Sha, ApiError> {
        let url = format!("/repos/{}/{}/git/blobs", self.owner(), self.repo_name());

        let response: ShaResponse = self
            .inner()
            .post(
                &url,
                Some(&BlobRequest {
                    content: content_base64,
                    encoding: "base64",
                }),
            )
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(response.sha)
    }

    async fn create_tree(
        &self,
        entries: &[TreeEntry],
        base: Option<&Sha>,
    ) -> Result<Sha, ApiError> {
        let url = format!("/repos/{}/{}/git/trees", self.owner(), self.repo_name());

        let response: ShaResponse = self
            .inner()
            .post(
                &url,
                Some(&TreeRequest {
                    tree: entries,
                    base_tree: base,
                }),
            )
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(response.sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree: &Sha,
        parent: Option<&Sha>,
    ) -> Result<Sha, ApiError> {
        let url = format!("/repos/{}/{}/git/commits", self.owner(), self.repo_name());

        let response: ShaResponse = self
            .inner()
            .post(
                &url,
                Some(&CommitRequest {
                    message,
                    tree,
                    parents: parent.into_iter().collect(),
                }),
            )
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(response.sha)
    }

    async fn update_branch(&self, branch: &BranchName, commit: &Sha) -> Result<(), ApiError> {
        let url = format!(
            "/repos/{}/{}/git/refs/{}",
            self.owner(),
            self.repo_name(),
            branch.ref_path()
        );

        let _: serde_json::Value = self
            .inner()
            .patch(&url, Some(&UpdateRefRequest { sha: commit }))
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(())
    }

    async fn create_branch(&self, branch: &BranchName, commit: &Sha) -> Result<(), ApiError> {
        let url = format!("/repos/{}/{}/git/refs", self.owner(), self.repo_name());

        let _: serde_json::Value = self
            .inner()
            .post(
                &url,
                Some(&CreateRefRequest {
                    full_ref: branch.full_ref(),
                    sha: commit,
                }),
            )
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(())
    }

    async fn put_file(
        &self,
        path: &str,
        message: &str,
        content_base64: &str,
        branch: &BranchName,
    ) -> Result<(), ApiError> {
        // URL-encode each segment: characters like '#' or '?' in a filename
        // would otherwise truncate the route.
        let url = format!(
            "/repos/{}/{}/contents/{}",
            self.owner(),
            self.repo_name(),
            encode_path(path)
        );

        let _: serde_json::Value = self
            .inner()
            .put(
                &url,
                Some(&PutFileRequest {
                    message,
                    content: content_base64,
                    branch: branch.as_str(),
                }),
            )
            .await
            .map_err(ApiError::from_octocrab)?;

        Ok(())
    }
}

/// Percent-encodes a repository path for use in a route, segment by segment
/// so the separating slashes survive.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encode_path("docs/a b#1.txt"), "docs/a%20b%231.txt");
        assert_eq!(encode_path("notes?.md"), "notes%3F.md");
        assert_eq!(encode_path("50%.txt"), "50%25.txt");
    }

    #[test]
    fn plain_paths_pass_through_unchanged() {
        assert_eq!(encode_path("src/github/api.rs"), "src/github/api.rs");
        assert_eq!(encode_path("README.md"), "README.md");
    }

    #[test]
    fn blob_entries_use_regular_file_mode() {
        let entry = TreeEntry::blob("src/main.rs".into(), Sha::new("abc"));
        assert_eq!(entry.mode, "100644");
        assert_eq!(entry.kind, "blob");
    }

    #[test]
    fn tree_request_omits_absent_base() {
        let entries = [TreeEntry::blob("a.txt".into(), Sha::new("abc"))];

        let without_base = serde_json::to_value(TreeRequest {
            tree: &entries,
            base_tree: None,
        })
        .unwrap();
        assert!(without_base.get("base_tree").is_none());
        assert_eq!(without_base["tree"][0]["type"], "blob");

        let base = Sha::new("basetree");
        let with_base = serde_json::to_value(TreeRequest {
            tree: &entries,
            base_tree: Some(&base),
        })
        .unwrap();
        assert_eq!(with_base["base_tree"], "basetree");
    }

    #[test]
    fn commit_request_parents_match_first_and_subsequent_commits() {
        let tree = Sha::new("tree");

        let first = serde_json::to_value(CommitRequest {
            message: "m",
            tree: &tree,
            parents: Vec::new(),
        })
        .unwrap();
        assert_eq!(first["parents"].as_array().unwrap().len(), 0);

        let parent = Sha::new("parent");
        let subsequent = serde_json::to_value(CommitRequest {
            message: "m",
            tree: &tree,
            parents: vec![&parent],
        })
        .unwrap();
        assert_eq!(subsequent["parents"][0], "parent");
    }

    #[test]
    fn create_ref_request_uses_fully_qualified_ref() {
        let sha = Sha::new("abc");
        let request = serde_json::to_value(CreateRefRequest {
            full_ref: BranchName::new("main").full_ref(),
            sha: &sha,
        })
        .unwrap();
        assert_eq!(request["ref"], "refs/heads/main");
    }
}
