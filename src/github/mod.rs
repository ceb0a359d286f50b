//! GitHub API client and the git-data surface used by the publishers.
//!
//! The client wraps octocrab and scopes every operation to one repository.
//! The `GitData` trait is the seam between publish logic and the REST API;
//! tests implement it with scripted fakes.

mod api;
mod client;
mod error;

pub use api::{GitData, TreeEntry};
pub use client::GithubClient;
pub use error::ApiError;
