use super::login::prompt_email;
use super::open_view;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_success};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Account email; prompted for when omitted
    #[arg(short, long)]
    email: Option<String>,
    /// Account password; prompted for (twice) when omitted
    #[arg(short, long)]
    password: Option<String>,
}

pub async fn cmd(args: SignupArgs) -> Result<()> {
    let email = prompt_email(args.email)?;
    let password = match args.password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptPassword.to_string())
            .with_confirmation(Message::PromptConfirmPassword.to_string(), Message::PasswordMismatch.to_string())
            .interact()?,
    };

    let mut view = open_view()?;
    if !view.signup(&email, &password).await {
        msg_bail_anyhow!(Message::SignupFailed);
    }

    msg_success!(Message::SignupSucceeded(email));
    Ok(())
}
