//! Remote authority access for todosync.
//!
//! The core never talks HTTP directly. Every request goes through the
//! [`Transport`] trait as an [`ApiRequest`] and comes back as an
//! [`ApiResponse`], so the auth gateway and the todo store can be driven by
//! any request/response capability: the reqwest-backed [`HttpTransport`] in
//! production, an in-process mock in tests.
//!
//! ## Features
//!
//! - **Auth Gateway**: login, signup, logout and identity checks with session upkeep
//! - **Transport Seam**: a single async `send` operation, no retry, no hidden state
//! - **Bounded Requests**: [`dispatch`] puts a timeout on every call and classifies the status
//! - **Credentials**: the session credential rides along on each request
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use todosync::api::{AuthGateway, HttpTransport};
//! use todosync::libs::session::SessionStore;
//!
//! let transport = Arc::new(HttpTransport::new("http://localhost:3000/api", std::time::Duration::from_secs(30))?);
//! let sessions = Arc::new(SessionStore::in_memory());
//! let gateway = AuthGateway::new(transport, sessions);
//! let signed_in = gateway.login("x@x.com", "secret").await;
//! ```

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub mod auth;
pub mod error;
pub mod http;

pub use auth::AuthGateway;
pub use error::{SyncError, TransportFailure, ValidationFailure};
pub use http::HttpTransport;

/// Upper bound on a single remote call when no configuration overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A logical request to the remote authority.
///
/// `path` is relative to the configured API base URL. The transport decides
/// how `credential` is attached; the HTTP transport sends it as a cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub credential: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            credential: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, SyncError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential;
        self
    }
}

/// What came back from the remote authority, before status classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// `name=value` pairs of all `Set-Cookie` headers joined with `; `, if any.
    pub set_cookie: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            set_cookie: None,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.set_cookie = Some(cookie.into());
        self
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, SyncError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Maps non-2xx statuses onto [`SyncError`].
    pub fn into_result(self) -> Result<Self, SyncError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(SyncError::from_status(self.status))
        }
    }
}

/// A generic request/response capability.
///
/// Implementations resolve every request exactly once. They must not retry
/// and must not interpret the status; classification happens in [`dispatch`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends one request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Transport`] when no response was obtained at all.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SyncError>;
}

/// Sends `request` through `transport`, bounded by `timeout`.
///
/// A request that does not resolve in time becomes
/// [`TransportFailure::Timeout`]; a non-success status becomes
/// [`SyncError::Auth`] or [`TransportFailure::Status`].
pub async fn dispatch<T: Transport>(transport: &T, request: ApiRequest, timeout: Duration) -> Result<ApiResponse, SyncError> {
    let method = request.method.clone();
    let path = request.path.clone();
    debug!(%method, %path, "sending request");

    let response = match tokio::time::timeout(timeout, transport.send(request)).await {
        Ok(response) => response?,
        Err(_) => {
            debug!(%method, %path, ?timeout, "request timed out");
            return Err(TransportFailure::Timeout(timeout).into());
        }
    };

    debug!(%method, %path, status = response.status.as_u16(), "response received");
    response.into_result()
}
