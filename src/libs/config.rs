//! Configuration management for todosync.
//!
//! Settings live in `config.json` inside the platform application data
//! directory:
//!
//! - **Windows**: `%LOCALAPPDATA%\todosync\config.json`
//! - **macOS**: `~/Library/Application Support/todosync/config.json`
//! - **Linux**: `~/.local/share/todosync/config.json`
//!
//! A missing file means defaults. `TODOSYNC_API_URL` (also read from a `.env`
//! file) overrides the API base URL without touching the file, which keeps
//! scripted and test runs independent of the user's saved setup.
//!
//! ```rust,ignore
//! use todosync::libs::config::Config;
//!
//! let config = Config::load()?;
//! println!("API: {}", config.api_base_url);
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding [`Config::api_base_url`].
pub const API_URL_ENV: &str = "TODOSYNC_API_URL";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root of the remote authority's API, e.g. `http://localhost:3000/api`.
    pub api_base_url: String,

    /// Upper bound for one remote call, in seconds. A request still pending
    /// after this is treated as a transport failure and rolled back.
    pub request_timeout_secs: u64,

    /// Lifetime of a stored session, in hours.
    pub session_ttl_hours: u64,

    /// Quiet period after the last keystroke before the new-item field is
    /// validated, in milliseconds.
    pub validation_debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "http://localhost:3000/api".to_string(),
            request_timeout_secs: 30,
            session_ttl_hours: 24,
            validation_debounce_ms: 1000,
        }
    }
}

impl Config {
    /// Reads the configuration file, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// [`Config::read`] plus environment overrides.
    pub fn load() -> Result<Config> {
        let mut config = Self::read()?;
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url.trim().to_string();
            }
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive setup, prefilled with the current values.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();
        msg_print!(Message::ConfigModuleApi);

        Ok(Config {
            api_base_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptApiUrl.to_string())
                .default(current.api_base_url)
                .interact_text()?,
            request_timeout_secs: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptRequestTimeout.to_string())
                .default(current.request_timeout_secs.max(1))
                .validate_with(require_positive)
                .interact_text()?,
            session_ttl_hours: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSessionTtl.to_string())
                .default(current.session_ttl_hours.max(1))
                .validate_with(require_positive)
                .interact_text()?,
            validation_debounce_ms: current.validation_debounce_ms,
        })
    }

    /// Never less than one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Never less than one hour.
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_hours.max(1).saturating_mul(60 * 60))
    }

    pub fn validation_debounce(&self) -> Duration {
        Duration::from_millis(self.validation_debounce_ms)
    }
}

fn require_positive(value: &u64) -> Result<(), String> {
    if *value == 0 {
        Err(Message::ValueMustBePositive.to_string())
    } else {
        Ok(())
    }
}
