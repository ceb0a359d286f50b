//! Newtype wrappers for domain identifiers.
//!
//! These types prevent accidental mixing of different identifier types (e.g.,
//! passing a branch name where a commit SHA is expected) and make the code
//! more self-documenting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A git object SHA (40 hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sha(pub String);

impl Sha {
    /// Creates a new Sha from a string.
    ///
    /// Note: This does not validate the format. Valid SHAs are 40 hex characters.
    pub fn new(s: impl Into<String>) -> Self {
        Sha(s.into())
    }

    /// Returns the SHA as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a short (7-character) version of the SHA for display.
    pub fn short(&self) -> &str {
        // Input may be shorter than 7 bytes or not ASCII; fall back to the whole string.
        self.0.get(..7).unwrap_or(&self.0)
    }
}

impl fmt::Display for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Sha {
    fn from(s: String) -> Self {
        Sha(s)
    }
}

impl From<&str> for Sha {
    fn from(s: &str) -> Self {
        Sha(s.to_string())
    }
}

/// A repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A git branch name, without any `refs/heads/` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn new(s: impl Into<String>) -> Self {
        BranchName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The short ref path used by the ref lookup/update endpoints (`heads/main`).
    pub fn ref_path(&self) -> String {
        format!("heads/{}", self.0)
    }

    /// The fully qualified ref used when creating the ref (`refs/heads/main`).
    pub fn full_ref(&self) -> String {
        format!("refs/heads/{}", self.0)
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BranchName {
    fn from(s: &str) -> Self {
        BranchName(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha_short_truncates_to_seven() {
        let sha = Sha::new("0123456789abcdef0123456789abcdef01234567");
        assert_eq!(sha.short(), "0123456");
    }

    #[test]
    fn sha_short_handles_short_input() {
        let sha = Sha::new("abc");
        assert_eq!(sha.short(), "abc");
    }

    #[test]
    fn repo_id_displays_as_owner_slash_repo() {
        let repo = RepoId::new("octocat", "hello-world");
        assert_eq!(repo.to_string(), "octocat/hello-world");
    }

    #[test]
    fn branch_ref_paths() {
        let branch = BranchName::new("main");
        assert_eq!(branch.ref_path(), "heads/main");
        assert_eq!(branch.full_ref(), "refs/heads/main");
    }
}
