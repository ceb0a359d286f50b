//! Core domain types.

mod ids;

pub use ids::{BranchName, RepoId, Sha};
