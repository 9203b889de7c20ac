#![allow(dead_code)]

use parking_lot::Mutex;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Arc;
use todosync::api::{ApiRequest, ApiResponse, SyncError, Transport, TransportFailure};
use todosync::libs::session::{Session, SessionStore};

/// What the mock answers to the next request.
pub enum Reply {
    Respond(ApiResponse),
    Fail(SyncError),
    /// Never resolves; only the caller's timeout ends the request.
    Hang,
}

/// Scripted in-process transport. Replies are consumed in order and every
/// request is recorded for later inspection.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, reply: Reply) -> &Self {
        self.replies.lock().push_back(reply);
        self
    }

    pub fn ok(&self, body: &str) -> &Self {
        self.push(Reply::Respond(ApiResponse::ok(body)))
    }

    pub fn status(&self, status: u16) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.push(Reply::Respond(ApiResponse::new(status, "")))
    }

    pub fn network_error(&self) -> &Self {
        self.push(Reply::Fail(TransportFailure::Network("connection refused".to_string()).into()))
    }

    pub fn hang(&self) -> &Self {
        self.push(Reply::Hang)
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SyncError> {
        self.requests.lock().push(request);
        let reply = self.replies.lock().pop_front();
        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(TransportFailure::Network("no reply scripted".to_string()).into()),
        }
    }
}

pub fn todo_json(id: &str, item: &str, completed: bool) -> String {
    format!(
        r#"{{"_id":"{}","item":"{}","completed":{},"createdAt":"2024-01-01T10:00:00Z","updatedAt":"2024-01-01T10:00:00Z"}}"#,
        id, item, completed
    )
}

pub fn list_json(todos: &[(&str, &str, bool)]) -> String {
    let items: Vec<String> = todos.iter().map(|(id, item, completed)| todo_json(id, item, *completed)).collect();
    format!("[{}]", items.join(","))
}

/// A session store that already holds a signed-in user.
pub fn signed_in_sessions() -> Arc<SessionStore> {
    let sessions = SessionStore::in_memory();
    let session = Session::new(serde_json::json!({"email": "x@x.com"}), Some("sid=abc".to_string()));
    sessions.set_session(&session).unwrap();
    Arc::new(sessions)
}
