//! GitHub API error type.
//!
//! The publishers only care about one classification: does an error mean the
//! branch reference (or the repository's history) simply does not exist yet?
//! That case, HTTP 404 or 409, switches the bulk publisher onto its
//! first-commit path. Every other API failure is fatal to the run.

use std::fmt;
use thiserror::Error;

/// A GitHub API error with enough context to decide whether the
/// missing-reference tolerance applies.
#[derive(Debug, Error)]
pub struct ApiError {
    /// The HTTP status code, if one could be determined.
    pub status: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl ApiError {
    /// Wraps an octocrab error, extracting a status code where possible.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let message = err.to_string();
        Self {
            status: status_from_message(&message),
            message,
            source: Some(err),
        }
    }

    /// Creates an error with an explicit status and no octocrab source.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error without a status or octocrab source.
    pub fn without_source(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error means the looked-up reference or commit
    /// does not exist yet (empty repository, unborn branch).
    ///
    /// GitHub reports an unborn branch as 404 on the ref endpoint and an
    /// entirely empty repository as 409 on some git-data endpoints.
    pub fn is_missing_ref(&self) -> bool {
        matches!(self.status, Some(404) | Some(409))
    }
}

/// Extracts an HTTP status code from an error message.
///
/// octocrab's `Error` doesn't expose a stable status accessor across all its
/// variants, so this parses the message. The fallback (`None`) is safe: an
/// unclassified error is treated as fatal, never as the tolerated
/// missing-reference case.
fn status_from_message(message: &str) -> Option<u16> {
    // octocrab formats HTTP errors with a "status: NNN" fragment.
    if let Some(idx) = message.find("status: ") {
        let rest = &message[idx + 8..];
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .map_or(rest.trim(), |end| &rest[..end]);
        if let Ok(code) = digits.parse() {
            return Some(code);
        }
    }

    let lower = message.to_lowercase();
    if message.contains("404") && lower.contains("not found") {
        return Some(404);
    }
    if message.contains("409") && lower.contains("conflict") {
        return Some(409);
    }
    for code in [422u16, 403, 401, 429, 500, 502, 503] {
        if message.contains(&code.to_string()) {
            return Some(code);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_fragment() {
        assert_eq!(status_from_message("GitHub error, status: 404"), Some(404));
        assert_eq!(
            status_from_message("something, status: 422, more"),
            Some(422)
        );
    }

    #[test]
    fn recognizes_not_found_and_conflict_phrases() {
        assert_eq!(status_from_message("404 Not Found"), Some(404));
        assert_eq!(status_from_message("409 Conflict: repo empty"), Some(409));
    }

    #[test]
    fn unknown_messages_have_no_status() {
        assert_eq!(status_from_message("connection reset by peer"), None);
    }

    #[test]
    fn missing_ref_covers_not_found_and_conflict_only() {
        assert!(ApiError::with_status(404, "no ref").is_missing_ref());
        assert!(ApiError::with_status(409, "empty repo").is_missing_ref());
        assert!(!ApiError::with_status(500, "boom").is_missing_ref());
        assert!(!ApiError::without_source("timeout").is_missing_ref());
    }
}
