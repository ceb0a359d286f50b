//! Credential caching around a token broker.

use std::future::Future;

use chrono::{DateTime, Utc};

use super::error::ConnectorError;

/// A short-lived GitHub credential returned by the broker.
///
/// Owned by the running process only; never persisted.
#[derive(Debug, Clone)]
pub struct Credential {
    /// The opaque bearer token.
    pub token: String,

    /// When the token stops being valid, if the broker reported an expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Returns true if the credential can still be used at `now`.
    ///
    /// A credential without an expiry is never considered fresh: the broker
    /// is asked again rather than guessing at the token's lifetime.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires > now)
    }
}

/// The seam between credential caching and the actual broker round-trip.
///
/// Production code uses [`super::ConnectorBroker`]; tests substitute a fake
/// to observe how often a fetch actually happens.
pub trait TokenBroker {
    /// Performs one broker round-trip and returns the credential it issued.
    fn fetch(&self) -> impl Future<Output = Result<Credential, ConnectorError>> + Send;
}

/// Caches a broker credential and refetches it once expired.
///
/// Constructed once by the caller and threaded into the publish entry point,
/// so the cached state is an explicit value rather than a process-wide global.
#[derive(Debug)]
pub struct TokenProvider<B> {
    broker: B,
    cached: Option<Credential>,
}

impl<B: TokenBroker> TokenProvider<B> {
    pub fn new(broker: B) -> Self {
        TokenProvider {
            broker,
            cached: None,
        }
    }

    /// Returns a usable access token, hitting the broker only when the cached
    /// credential is missing or no longer fresh.
    pub async fn access_token(&mut self) -> Result<String, ConnectorError> {
        if let Some(cached) = &self.cached {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.token.clone());
            }
        }

        let credential = self.broker.fetch().await?;
        let token = credential.token.clone();
        self.cached = Some(credential);
        Ok(token)
    }
}
