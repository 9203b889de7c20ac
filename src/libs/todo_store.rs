//! Task Store: the canonical in-memory todo list for the current session.
//!
//! The store mirrors the remote list and keeps two derived facts current
//! after every change: the list order (open items first, then by text,
//! ignoring case) and the number of open items.
//!
//! ## Mutation policy
//!
//! | Operation | Local change | On failure |
//! |-----------|--------------|------------|
//! | `load_all` | after response | list untouched |
//! | `create` | after response | nothing appended |
//! | `toggle_completion` | before request (optimistic) | flip reverted |
//! | `delete` | after response | nothing removed |
//!
//! All mutators take `&mut self`, so two operations on the same store can
//! never interleave. A toggle is fully resolved, including its rollback,
//! before a delete of the same item can start.
//!
//! Any auth failure clears the session store: the credential is no longer
//! accepted and the user has to sign in again.

use super::session::SessionStore;
use super::todo::{count_open, sort_todos, NewTodo, Todo};
use crate::api::error::validate_item;
use crate::api::{dispatch, ApiRequest, ApiResponse, SyncError, Transport, TransportFailure, DEFAULT_TIMEOUT};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const TODO_URL: &str = "todo";

pub struct TodoStore<T: Transport> {
    transport: Arc<T>,
    sessions: Arc<SessionStore>,
    timeout: Duration,
    todos: Vec<Todo>,
    open_count: usize,
}

impl<T: Transport> TodoStore<T> {
    pub fn new(transport: Arc<T>, sessions: Arc<SessionStore>) -> Self {
        Self {
            transport,
            sessions,
            timeout: DEFAULT_TIMEOUT,
            todos: Vec::new(),
            open_count: 0,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn open_count(&self) -> usize {
        self.open_count
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Replaces the local list with the remote one.
    ///
    /// # Errors
    ///
    /// On any failure the current list is kept as it was.
    pub async fn load_all(&mut self) -> Result<&[Todo], SyncError> {
        let response = self.request(ApiRequest::get(TODO_URL)).await?;
        let todos: Vec<Todo> = response.json()?;

        debug!(count = todos.len(), "todo list loaded");
        self.todos = todos;
        self.refresh();
        Ok(&self.todos)
    }

    /// Saves a new item and appends the server's record.
    ///
    /// Nothing is added locally until the remote authority has assigned an
    /// id, so a failed create leaves no trace in the list.
    ///
    /// # Errors
    ///
    /// [`SyncError::Validation`] for text failing the required/min-length
    /// rules (no request is sent), otherwise the request's failure.
    pub async fn create(&mut self, text: &str) -> Result<Todo, SyncError> {
        if let Some(failure) = validate_item(text).into_iter().next() {
            return Err(failure.into());
        }

        let stub = Todo::new(text.trim());
        let request = ApiRequest::post(TODO_URL).json(&NewTodo { item: &stub.item })?;
        let saved: Todo = self.request(request).await?.json()?;
        if !saved.is_persisted() {
            return Err(TransportFailure::Decode("created todo has no id".to_string()).into());
        }

        debug!(id = %saved.id, "todo created");
        self.todos.push(saved.clone());
        self.refresh();
        Ok(saved)
    }

    /// Flips `completed` right away and confirms it remotely.
    ///
    /// # Errors
    ///
    /// [`SyncError::NotFound`] if `id` is not in the list. On a failed
    /// update the flip is reverted before the error is returned.
    pub async fn toggle_completion(&mut self, id: &str) -> Result<(), SyncError> {
        let mut updated = self.get(id).cloned().ok_or_else(|| SyncError::NotFound(id.to_string()))?;
        updated.completed = !updated.completed;
        let request = ApiRequest::put(Self::item_url(id)).json(&updated)?;

        self.set_completed(id, updated.completed);

        match self.request(request).await {
            Ok(response) => {
                self.confirm(id, &response);
                self.refresh();
                Ok(())
            }
            Err(err) => {
                debug!(%id, error = %err, "toggle failed, reverting");
                self.set_completed(id, !updated.completed);
                self.refresh();
                Err(err)
            }
        }
    }

    /// Deletes an item remotely, then drops it locally.
    ///
    /// # Errors
    ///
    /// [`SyncError::NotFound`] if `id` is not in the list. A failed
    /// request leaves the list exactly as it was.
    pub async fn delete(&mut self, id: &str) -> Result<(), SyncError> {
        if self.get(id).is_none() {
            return Err(SyncError::NotFound(id.to_string()));
        }

        self.request(ApiRequest::delete(Self::item_url(id))).await?;

        debug!(%id, "todo deleted");
        self.todos.retain(|todo| todo.id != id);
        self.refresh();
        Ok(())
    }

    /// Forgets every item, e.g. after logout.
    pub fn clear(&mut self) {
        self.todos.clear();
        self.refresh();
    }

    fn item_url(id: &str) -> String {
        format!("{}/{}", TODO_URL, id)
    }

    fn set_completed(&mut self, id: &str, completed: bool) {
        if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
            todo.completed = completed;
        }
    }

    /// Adopts the server's copy of an updated item when the body carries one.
    fn confirm(&mut self, id: &str, response: &ApiResponse) {
        let Ok(record) = response.json::<Todo>() else {
            return;
        };
        if record.id != id {
            return;
        }
        if let Some(todo) = self.todos.iter_mut().find(|todo| todo.id == id) {
            *todo = record;
        }
    }

    fn refresh(&mut self) {
        sort_todos(&mut self.todos);
        self.open_count = count_open(&self.todos);
    }

    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, SyncError> {
        let credential = self.sessions.get_session().and_then(|session| session.credential);
        let result = dispatch(self.transport.as_ref(), request.credential(credential), self.timeout).await;

        if let Err(err) = &result {
            if err.is_auth() {
                warn!(error = %err, "credential rejected, clearing session");
                if let Err(clear_err) = self.sessions.clear_session() {
                    warn!(error = %clear_err, "failed to clear session");
                }
            }
        }
        result
    }
}
