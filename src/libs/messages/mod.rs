pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

// Convenience functions for common message patterns
pub fn error(msg: Message) -> String {
    format!("❌ {}", msg)
}

pub fn info(msg: Message) -> String {
    format!("ℹ️  {}", msg)
}
