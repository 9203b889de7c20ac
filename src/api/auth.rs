//! Auth Gateway: login, signup, logout and identity checks.
//!
//! Each operation issues exactly one request and resolves to a plain `bool`.
//! Failures never propagate; they are logged and folded into the outcome so
//! the view layer can render state without unwinding.
//!
//! Session upkeep:
//!
//! | Operation | Success | Failure |
//! |-----------|---------|---------|
//! | `check_authenticated` | session kept | session cleared |
//! | `login` / `signup` | identity stored | nothing stored |
//! | `logout` | session cleared | session kept |

use super::{dispatch, ApiRequest, Transport, DEFAULT_TIMEOUT};
use crate::libs::session::{Session, SessionStore};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const IDENTITY_URL: &str = "user/identity";
const LOGIN_URL: &str = "user/login";
const SIGNUP_URL: &str = "user";
const LOGOUT_URL: &str = "user/logout";

#[derive(Serialize)]
struct LoginCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct AuthGateway<T: Transport> {
    transport: Arc<T>,
    sessions: Arc<SessionStore>,
    timeout: Duration,
}

impl<T: Transport> AuthGateway<T> {
    pub fn new(transport: Arc<T>, sessions: Arc<SessionStore>) -> Self {
        Self {
            transport,
            sessions,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The stored session, if any. Presence is belief, not proof.
    pub fn current_session(&self) -> Option<Session> {
        self.sessions.get_session()
    }

    /// Confirms the stored identity with the remote authority.
    ///
    /// Fails closed: a forbidden answer, any other status, a network error
    /// or a timeout all clear the session and return `false`.
    pub async fn check_authenticated(&self) -> bool {
        let request = ApiRequest::get(IDENTITY_URL).credential(self.credential());
        match dispatch(self.transport.as_ref(), request, self.timeout).await {
            Ok(_) => true,
            Err(err) => {
                if err.is_forbidden() {
                    debug!("identity check refused, clearing session");
                } else {
                    warn!(error = %err, "identity check failed, clearing session");
                }
                self.clear();
                false
            }
        }
    }

    /// Signs in with existing credentials. Never retries.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.authenticate(ApiRequest::put(LOGIN_URL), email, password).await
    }

    /// Creates an account and signs in with it.
    pub async fn signup(&self, email: &str, password: &str) -> bool {
        self.authenticate(ApiRequest::post(SIGNUP_URL), email, password).await
    }

    /// Ends the remote session.
    ///
    /// The local session is only dropped once the remote authority confirmed
    /// the logout, so a failed call leaves both sides signed in.
    pub async fn logout(&self) -> bool {
        let request = ApiRequest::get(LOGOUT_URL).credential(self.credential());
        match dispatch(self.transport.as_ref(), request, self.timeout).await {
            Ok(_) => {
                self.clear();
                true
            }
            Err(err) => {
                warn!(error = %err, "logout failed, keeping session");
                false
            }
        }
    }

    async fn authenticate(&self, request: ApiRequest, email: &str, password: &str) -> bool {
        let path = request.path.clone();
        let result = async {
            let request = request.json(&LoginCredentials { email, password })?;
            let response = dispatch(self.transport.as_ref(), request, self.timeout).await?;
            Session::from_response(&response)
        }
        .await;

        let session = match result {
            Ok(session) => session,
            Err(err) => {
                warn!(%path, error = %err, "authentication failed");
                return false;
            }
        };

        match self.sessions.set_session(&session) {
            Ok(()) => {
                debug!(%path, "session stored");
                true
            }
            Err(err) => {
                warn!(%path, error = %err, "failed to store session");
                false
            }
        }
    }

    fn credential(&self) -> Option<String> {
        self.sessions.get_session().and_then(|session| session.credential)
    }

    fn clear(&self) {
        if let Err(err) = self.sessions.clear_session() {
            warn!(error = %err, "failed to clear session");
        }
    }
}
