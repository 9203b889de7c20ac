//! Debounced validation of the new-item text field.
//!
//! Every keystroke pushes the validation deadline out by the debounce
//! delay; the message is only recomputed once the field has been quiet for
//! that long. Before the first keystroke (and after a reset) the field is
//! untouched and shows no message at all.

use crate::api::error::validate_item;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct ItemField {
    value: String,
    touched: bool,
    debounce: Duration,
    deadline: Option<Instant>,
    message: String,
}

impl Default for ItemField {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl ItemField {
    pub fn new(debounce: Duration) -> Self {
        Self {
            value: String::new(),
            touched: false,
            debounce,
            deadline: None,
            message: String::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The current validation message, if any.
    pub fn message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_valid(&self) -> bool {
        validate_item(&self.value).is_empty()
    }

    /// True while a validation run is scheduled.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Records an input event and reschedules validation.
    pub fn input(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.touched = true;
        self.deadline = Some(Instant::now() + self.debounce);
    }

    /// Marks the field as interacted with, without changing its value.
    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Runs the scheduled validation if its quiet period has elapsed.
    ///
    /// Returns `true` when validation ran.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                self.deadline = None;
                self.apply();
                true
            }
            _ => false,
        }
    }

    /// Waits out the pending quiet period, then validates.
    pub async fn settled(&mut self) {
        if let Some(deadline) = self.deadline {
            tokio::time::sleep_until(deadline).await;
            self.deadline = None;
            self.apply();
        }
    }

    /// Cancels any pending run and validates immediately.
    pub fn validate_now(&mut self) -> Option<&str> {
        self.deadline = None;
        self.apply();
        self.message()
    }

    /// Clears the value and returns the field to its untouched state.
    pub fn reset(&mut self) {
        self.value.clear();
        self.touched = false;
        self.deadline = None;
        self.message.clear();
    }

    fn apply(&mut self) {
        self.message = if self.touched {
            validate_item(&self.value)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            String::new()
        };
    }
}
