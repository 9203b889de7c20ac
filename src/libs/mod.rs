//! Core library modules for todosync.
//!
//! ## Layout
//!
//! - **State**: [`todo`] model, [`todo_store`] synchronization, [`view`] adapter
//! - **Session**: [`session`] store over an expiring key/value backend, [`secret`] cipher
//! - **Input**: [`validation`] of the new-item field
//! - **Infrastructure**: [`config`], [`data_storage`], [`messages`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use todosync::api::HttpTransport;
//! use todosync::libs::{config::Config, session::SessionStore, view::TodoView};
//!
//! let config = Config::load()?;
//! let transport = Arc::new(HttpTransport::from_config(&config)?);
//! let mut view = TodoView::new(transport, Arc::new(SessionStore::in_memory()), &config);
//! view.refresh().await;
//! ```

pub mod config;
pub mod data_storage;
pub mod messages;
pub mod secret;
pub mod session;
pub mod todo;
pub mod todo_store;
pub mod validation;
pub mod view;
