//! Command-line front end.
//!
//! Each subcommand builds a [`TodoView`] over the HTTP transport and the
//! encrypted session file, forwards one intent and prints the outcome.

pub mod add;
pub mod delete;
pub mod done;
pub mod init;
pub mod list;
pub mod login;
pub mod logout;
pub mod signup;
pub mod whoami;

use crate::api::HttpTransport;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::session::{FileStore, SessionStore};
use crate::libs::view::TodoView;
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the remote API")]
    Init,
    #[command(about = "Create an account and log in")]
    Signup(signup::SignupArgs),
    #[command(about = "Log in")]
    Login(login::LoginArgs),
    #[command(about = "Log out")]
    Logout,
    #[command(about = "Check the stored session against the server")]
    Whoami,
    #[command(about = "Show the todo list")]
    List,
    #[command(about = "Add a todo item", arg_required_else_help = true)]
    Add(add::AddArgs),
    #[command(about = "Toggle completion of a todo item", arg_required_else_help = true)]
    Done(done::DoneArgs),
    #[command(about = "Delete a todo item", arg_required_else_help = true)]
    Rm(delete::DeleteArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Signup(args) => signup::cmd(args).await,
            Commands::Login(args) => login::cmd(args).await,
            Commands::Logout => logout::cmd().await,
            Commands::Whoami => whoami::cmd().await,
            Commands::List => list::cmd().await,
            Commands::Add(args) => add::cmd(args).await,
            Commands::Done(args) => done::cmd(args).await,
            Commands::Rm(args) => delete::cmd(args).await,
        }
    }
}

/// Builds the view over the configured API and the persisted session.
pub(crate) fn open_view() -> Result<TodoView<HttpTransport>> {
    let config = Config::load()?;
    let transport = Arc::new(HttpTransport::from_config(&config)?);
    let sessions = Arc::new(SessionStore::new(FileStore::new(), config.session_ttl()));
    Ok(TodoView::new(transport, sessions, &config))
}

/// Like [`open_view`], but requires a stored session and loads the list.
pub(crate) async fn open_signed_in_view() -> Result<TodoView<HttpTransport>> {
    let mut view = open_view()?;
    if !view.is_signed_in() {
        msg_bail_anyhow!(Message::NotLoggedIn);
    }
    if !view.refresh().await {
        let error = view.error_message().unwrap_or_default().to_string();
        msg_bail_anyhow!(Message::RequestFailed(error));
    }
    Ok(view)
}
