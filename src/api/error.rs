//! Error taxonomy for remote and local failures.
//!
//! Every operation of the auth gateway and the todo store resolves to an
//! explicit outcome. Failures are classified so callers can decide whether
//! to clear the session, roll back an optimistic change, or simply show a
//! field message:
//!
//! - [`SyncError::Auth`]: the remote authority refused the credential (401/403)
//! - [`SyncError::Transport`]: network, timeout, unexpected status or bad body
//! - [`SyncError::Validation`]: local input rejected before any request
//! - [`SyncError::NotFound`]: an operation named a task missing from the local list

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Minimum length of a todo item's text.
pub const MIN_ITEM_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("Not authorized (HTTP {status})")]
    Auth { status: u16 },

    #[error(transparent)]
    Transport(#[from] TransportFailure),

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Todo item '{0}' is not in the list")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unexpected response status {0}")]
    Status(u16),

    #[error("Malformed response body: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Todo item is required.")]
    Required,

    #[error("Must be at least {0} characters")]
    MinLength(usize),
}

impl SyncError {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth { status: status.as_u16() },
            other => Self::Transport(TransportFailure::Status(other.as_u16())),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// True only for the explicit "forbidden" answer of the identity endpoint.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Auth { status: 403 })
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Transport(TransportFailure::Decode(err.to_string()))
        } else {
            Self::Transport(TransportFailure::Network(err.to_string()))
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(TransportFailure::Decode(err.to_string()))
    }
}

/// Checks todo text against the required and minimum-length rules.
///
/// Returns every failing rule, in display order. Only `Required` is reported
/// for empty input, matching how form validators short-circuit on blank values.
pub fn validate_item(text: &str) -> Vec<ValidationFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![ValidationFailure::Required];
    }
    if trimmed.chars().count() < MIN_ITEM_LENGTH {
        return vec![ValidationFailure::MinLength(MIN_ITEM_LENGTH)];
    }
    Vec::new()
}
