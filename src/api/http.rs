//! reqwest-backed [`Transport`].
//!
//! Joins request paths onto the configured base URL, sends JSON bodies and
//! attaches the session credential as a `Cookie` header. The `name=value`
//! pairs of all `Set-Cookie` headers are handed back so the gateway can
//! persist them with the session. The client keeps no cookie jar: a request
//! carries exactly the credential of the current session, or none.

use super::{ApiRequest, ApiResponse, SyncError, Transport, TransportFailure};
use crate::libs::config::Config;
use reqwest::{
    header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE},
    Client,
};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SyncError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, SyncError> {
        Self::new(&config.api_base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn classify(&self, err: reqwest::Error) -> SyncError {
        if err.is_timeout() {
            TransportFailure::Timeout(self.timeout).into()
        } else {
            err.into()
        }
    }
}

/// Joins the `name=value` part of every `Set-Cookie` header into one
/// `Cookie` header value.
fn cookie_pairs(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|cookie| cookie.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SyncError> {
        let mut builder = self.client.request(request.method.clone(), self.url(&request.path));

        if let Some(credential) = &request.credential {
            let value = HeaderValue::from_str(credential).map_err(|e| TransportFailure::Network(e.to_string()))?;
            builder = builder.header(COOKIE, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let set_cookie = cookie_pairs(response.headers());
        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(ApiResponse { status, set_cookie, body })
    }
}
