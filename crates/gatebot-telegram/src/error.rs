//! Error types for the Telegram bot.

use thiserror::Error;

/// Errors that can occur in the Telegram bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Configuration problem at startup.
    #[error("configuration error: {0}")]
    Config(#[from] gatebot_core::ConfigError),

    /// The F&Home backend failed.
    #[error("F&Home error: {0}")]
    Fhome(#[from] gatebot_fhome::FhomeError),

    /// A Telegram API call failed.
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Result type for bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
