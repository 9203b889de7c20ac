//! # todosync
//!
//! A task-list client that keeps a sorted, optimistic view of a remote to-do
//! list and manages the authenticated session across requests.
//!
//! ## Features
//!
//! - **Session Management**: encrypted, expiring session storage with silent invalidation
//! - **Auth Gateway**: login, signup, logout and fail-closed identity checks
//! - **Optimistic Sync**: toggles apply immediately and roll back on failure
//! - **Deterministic Order**: open items first, then alphabetical, ignoring case
//! - **Bounded Requests**: every remote call times out into a regular failure
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todosync::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
