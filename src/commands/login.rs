use super::open_view;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email; prompted for when omitted
    #[arg(short, long)]
    email: Option<String>,
    /// Account password; prompted for when omitted
    #[arg(short, long)]
    password: Option<String>,
}

pub(crate) fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEmail.to_string())
            .interact_text()?),
    }
}

pub async fn cmd(args: LoginArgs) -> Result<()> {
    let email = prompt_email(args.email)?;
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptPassword.to_string())
            .interact()?,
    };

    let mut view = open_view()?;
    if !view.login(&email, &password).await {
        msg_bail_anyhow!(Message::LoginFailed);
    }

    msg_success!(Message::LoginSucceeded(email));
    Ok(())
}
