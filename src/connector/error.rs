//! Connector broker error types.

use thiserror::Error;

/// Errors raised while acquiring a GitHub credential from the broker.
///
/// All of these are fatal to a publish run: there is no fallback credential
/// source, and the broker round-trip is not retried.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The broker hostname environment variable is unset.
    #[error("connector hostname not configured (REPLIT_CONNECTORS_HOSTNAME is unset)")]
    MissingHostname,

    /// Neither identity environment variable is available.
    #[error("no identity token found (set REPL_IDENTITY or WEB_REPL_RENEWAL)")]
    MissingIdentity,

    /// The broker responded, but without a connection record or usable token.
    #[error("GitHub is not connected via the broker")]
    NotConnected,

    /// The broker round-trip itself failed (network, HTTP status, bad JSON).
    #[error("broker request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
