//! Publishes the contents of a local directory to a GitHub repository.
//!
//! Two strategies are available: a bulk publisher that builds a full git tree
//! and advances the branch in a single commit, and a per-file publisher that
//! issues one create-or-update-contents call (and therefore one commit) per
//! file. Authentication goes through a connector broker that exchanges a
//! local identity proof for a short-lived GitHub token.

pub mod config;
pub mod connector;
pub mod github;
pub mod publish;
pub mod scan;
pub mod types;
