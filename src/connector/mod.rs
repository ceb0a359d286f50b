//! Connector-brokered GitHub credentials.
//!
//! The broker exchanges a local identity proof (read from the environment)
//! for a short-lived GitHub access token. `TokenProvider` caches the returned
//! credential and refetches once it expires.

mod broker;
mod error;
mod provider;

pub use broker::ConnectorBroker;
pub use error::ConnectorError;
pub use provider::{Credential, TokenBroker, TokenProvider};
