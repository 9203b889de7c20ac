//! View Adapter: the state a UI binds to and the intents it forwards.
//!
//! The adapter owns the auth gateway, the todo store and the new-item field.
//! A front end reads the sorted list, the open count, the current error and
//! the field's validation message, and calls one method per user intent.
//! Every intent resolves to a `bool`; the details land in the exposed state.
//!
//! Error display rule: the last failure's text stays visible until the next
//! operation succeeds. Validation problems are reported on the field only
//! and never touch the error message.

use super::config::Config;
use super::messages::{self, Message};
use super::session::{Session, SessionStore};
use super::todo::Todo;
use super::todo_store::TodoStore;
use super::validation::ItemField;
use crate::api::{AuthGateway, SyncError, Transport};
use prettytable::{row, Table};
use std::sync::Arc;
use tracing::debug;

pub struct TodoView<T: Transport> {
    auth: AuthGateway<T>,
    store: TodoStore<T>,
    sessions: Arc<SessionStore>,
    item_field: ItemField,
    error_message: Option<String>,
    invalid_login: bool,
}

impl<T: Transport> TodoView<T> {
    pub fn new(transport: Arc<T>, sessions: Arc<SessionStore>, config: &Config) -> Self {
        Self {
            auth: AuthGateway::new(Arc::clone(&transport), Arc::clone(&sessions)).with_timeout(config.request_timeout()),
            store: TodoStore::new(transport, Arc::clone(&sessions)).with_timeout(config.request_timeout()),
            sessions,
            item_field: ItemField::new(config.validation_debounce()),
            error_message: None,
            invalid_login: false,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        self.store.todos()
    }

    pub fn open_count(&self) -> usize {
        self.store.open_count()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// True after the most recent login attempt failed.
    pub fn invalid_login(&self) -> bool {
        self.invalid_login
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.item_field.message()
    }

    pub fn item_field(&self) -> &ItemField {
        &self.item_field
    }

    pub fn item_field_mut(&mut self) -> &mut ItemField {
        &mut self.item_field
    }

    /// Forwards a keystroke in the new-item field.
    pub fn input(&mut self, text: impl Into<String>) {
        self.item_field.input(text);
    }

    /// Whether a session is stored. Belief only; see [`TodoView::check_session`].
    pub fn is_signed_in(&self) -> bool {
        self.sessions.has_session()
    }

    pub fn session(&self) -> Option<Session> {
        self.auth.current_session()
    }

    /// Looks up an item by id, falling back to its 1-based list position.
    pub fn resolve(&self, key: &str) -> Option<&Todo> {
        self.store.get(key).or_else(|| {
            key.parse::<usize>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .and_then(|index| self.todos().get(index))
        })
    }

    pub async fn check_session(&mut self) -> bool {
        let valid = self.auth.check_authenticated().await;
        if !valid {
            self.store.clear();
        }
        valid
    }

    /// Signs in, dropping any previous session first.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        if let Err(err) = self.sessions.clear_session() {
            debug!(error = %err, "failed to clear previous session");
        }
        self.store.clear();

        let ok = self.auth.login(email, password).await;
        self.invalid_login = !ok;
        self.settle(ok, Message::LoginFailed)
    }

    pub async fn signup(&mut self, email: &str, password: &str) -> bool {
        let ok = self.auth.signup(email, password).await;
        self.settle(ok, Message::SignupFailed)
    }

    pub async fn logout(&mut self) -> bool {
        let ok = self.auth.logout().await;
        if ok {
            self.store.clear();
            self.item_field.reset();
        }
        self.settle(ok, Message::LogoutFailed)
    }

    pub async fn refresh(&mut self) -> bool {
        let result = self.store.load_all().await.map(|_| ());
        self.record(result)
    }

    /// Saves the field's text as a new item.
    ///
    /// Invalid text is reported on the field and never sent. A successful
    /// save resets the field.
    pub async fn submit(&mut self) -> bool {
        self.item_field.touch();
        if self.item_field.validate_now().is_some() {
            return false;
        }

        let text = self.item_field.value().to_string();
        match self.store.create(&text).await {
            Ok(_) => {
                self.item_field.reset();
                self.record(Ok(()))
            }
            Err(err) => self.record(Err(err)),
        }
    }

    pub async fn toggle(&mut self, id: &str) -> bool {
        let result = self.store.toggle_completion(id).await;
        self.record(result)
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        let result = self.store.delete(id).await;
        self.record(result)
    }

    /// The list as a terminal table.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["#", "ID", "ITEM", "DONE", "UPDATED"]);
        for (index, todo) in self.todos().iter().enumerate() {
            let position = index + 1;
            let done = if todo.completed { "x" } else { "" };
            let updated = todo.updated_at.format("%Y-%m-%d %H:%M").to_string();
            table.add_row(row![position, todo.id, todo.item, done, updated]);
        }
        table
    }

    /// Prints the list, the open count and the current error, if any.
    pub fn render(&self) {
        if self.todos().is_empty() {
            println!("{}", messages::info(Message::TodosEmpty));
        } else {
            println!("{}", Message::TodosHeader);
            self.table().printstd();
        }
        println!("{}", Message::OpenItems(self.open_count()));
        if let Some(error) = self.error_message() {
            eprintln!("{}", messages::error(Message::RequestFailed(error.to_string())));
        }
    }

    fn record(&mut self, result: Result<(), SyncError>) -> bool {
        match result {
            Ok(()) => {
                self.error_message = None;
                true
            }
            Err(SyncError::Validation(failure)) => {
                self.item_field.touch();
                debug!(%failure, "rejected before sending");
                false
            }
            Err(err) => {
                self.error_message = Some(err.to_string());
                false
            }
        }
    }

    fn settle(&mut self, ok: bool, failure: Message) -> bool {
        if ok {
            self.error_message = None;
        } else {
            self.error_message = Some(failure.to_string());
        }
        ok
    }
}
