//! Broker client for exchanging a local identity proof for a GitHub token.
//!
//! The broker lives at a hostname read from the environment and is queried
//! over HTTPS with an identity header derived from one of two environment
//! variables. The response carries a list of connection records; the first
//! record's settings hold either a direct access token or a nested OAuth
//! credential.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::ConnectorError;
use super::provider::{Credential, TokenBroker};

/// Environment variable naming the broker host.
const HOSTNAME_VAR: &str = "REPLIT_CONNECTORS_HOSTNAME";

/// Identity proof for an interactive workspace, preferred when present.
const REPL_IDENTITY_VAR: &str = "REPL_IDENTITY";

/// Identity proof for a deployment, used as the fallback.
const WEB_REPL_RENEWAL_VAR: &str = "WEB_REPL_RENEWAL";

/// Broker client bound to a hostname and a resolved identity header.
pub struct ConnectorBroker {
    http: reqwest::Client,
    hostname: String,
    identity: String,
}

impl ConnectorBroker {
    /// Builds a broker client from the environment.
    ///
    /// Fails fast when the hostname or both identity variables are missing,
    /// before any file I/O or GitHub traffic happens.
    pub fn from_env(http: reqwest::Client) -> Result<Self, ConnectorError> {
        let hostname =
            std::env::var(HOSTNAME_VAR).map_err(|_| ConnectorError::MissingHostname)?;
        let identity = identity_header(
            std::env::var(REPL_IDENTITY_VAR).ok(),
            std::env::var(WEB_REPL_RENEWAL_VAR).ok(),
        )
        .ok_or(ConnectorError::MissingIdentity)?;

        Ok(ConnectorBroker {
            http,
            hostname,
            identity,
        })
    }
}

impl TokenBroker for ConnectorBroker {
    async fn fetch(&self) -> Result<Credential, ConnectorError> {
        let url = format!(
            "https://{}/api/v2/connection?include_secrets=true&connector_names=github",
            self.hostname
        );

        tracing::debug!(host = %self.hostname, "fetching GitHub credential from broker");

        let page: ConnectionPage = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .header("X_REPLIT_TOKEN", &self.identity)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let record = page
            .items
            .into_iter()
            .next()
            .ok_or(ConnectorError::NotConnected)?;

        credential_from_record(record).ok_or(ConnectorError::NotConnected)
    }
}

/// Formats the identity header value, preferring the repl identity.
fn identity_header(repl_identity: Option<String>, renewal: Option<String>) -> Option<String> {
    match (repl_identity, renewal) {
        (Some(repl), _) => Some(format!("repl {repl}")),
        (None, Some(depl)) => Some(format!("depl {depl}")),
        (None, None) => None,
    }
}

// ─── Broker Response Shapes ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ConnectionPage {
    #[serde(default)]
    items: Vec<ConnectionRecord>,
}

#[derive(Debug, Deserialize)]
struct ConnectionRecord {
    settings: Option<ConnectionSettings>,
}

#[derive(Debug, Default, Deserialize)]
struct ConnectionSettings {
    access_token: Option<String>,
    expires_at: Option<String>,
    oauth: Option<OauthSettings>,
}

#[derive(Debug, Deserialize)]
struct OauthSettings {
    credentials: Option<OauthCredentials>,
}

#[derive(Debug, Deserialize)]
struct OauthCredentials {
    access_token: Option<String>,
}

/// Extracts a credential from a connection record, if one is present.
///
/// The token lives either directly in the settings or under the nested OAuth
/// credentials; the direct token wins. An unparseable expiry is treated as
/// absent rather than failing the whole exchange.
fn credential_from_record(record: ConnectionRecord) -> Option<Credential> {
    let settings = record.settings?;

    let token = settings.access_token.clone().or_else(|| {
        settings
            .oauth
            .as_ref()?
            .credentials
            .as_ref()?
            .access_token
            .clone()
    })?;

    let expires_at = settings
        .expires_at
        .as_deref()
        .and_then(parse_expiry);

    Some(Credential { token, expires_at })
}

fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
