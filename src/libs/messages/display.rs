//! Display implementation for todosync messages.
//!
//! All wording is kept in one match so texts stay consistent and each new
//! variant forces an explicit formatting decision.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === AUTHENTICATION MESSAGES ===
            Message::LoginSucceeded(email) => format!("Logged in as {}", email),
            Message::LoginFailed => "Invalid email or password".to_string(),
            Message::SignupSucceeded(email) => format!("Account created for {}", email),
            Message::SignupFailed => "Could not create the account".to_string(),
            Message::LogoutSucceeded => "Logged out".to_string(),
            Message::LogoutFailed => "Logout failed, you are still logged in".to_string(),
            Message::NotLoggedIn => "You are not logged in. Run `todosync login` first.".to_string(),
            Message::SessionValid(identity) => format!("Session is valid for {}", identity),
            Message::SessionInvalid => "Session is not valid, please log in again".to_string(),

            // === TODO MESSAGES ===
            Message::TodoCreated(item) => format!("Added '{}'", item),
            Message::TodoCompleted(item) => format!("Completed '{}'", item),
            Message::TodoReopened(item) => format!("Reopened '{}'", item),
            Message::TodoDeleted(item) => format!("Deleted '{}'", item),
            Message::TodoNotFound(key) => format!("No todo item matches '{}'", key),
            Message::TodosEmpty => "Nothing to do".to_string(),
            Message::TodosHeader => "Todo list".to_string(),
            Message::OpenItems(count) => match count {
                1 => "1 item left".to_string(),
                count => format!("{} items left", count),
            },
            Message::InvalidTodoItem(reason) => format!("Invalid todo item: {}", reason),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleApi => "Remote API settings".to_string(),

            // === ERROR MESSAGES ===
            Message::RequestFailed(error) => format!("Request failed: {}", error),

            // === PROMPTS ===
            Message::PromptEmail => "Email".to_string(),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptConfirmPassword => "Repeat password".to_string(),
            Message::PasswordMismatch => "Passwords do not match".to_string(),
            Message::PromptApiUrl => "Enter the todo API URL".to_string(),
            Message::PromptRequestTimeout => "Request timeout (seconds)".to_string(),
            Message::PromptSessionTtl => "Session lifetime (hours)".to_string(),
            Message::ValueMustBePositive => "Value must be greater than zero".to_string(),
        };

        write!(f, "{}", text)
    }
}
