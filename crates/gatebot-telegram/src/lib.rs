//! Telegram bot interface for gatebot.
//!
//! This crate wires the Telegram side to the F&Home client: it receives
//! updates, authorizes the sender against the allow-list and, on a trigger
//! phrase, toggles the gate or reports the lighting levels.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: bot token from @BotFather
//! - `TELEGRAM_BOT_USERNAME`: the bot's own username
//! - `TELEGRAM_ALLOWED_CHAT_IDS` / `TELEGRAM_ALLOWED_USER_IDS`: allow-list
//! - `FHOME_EMAIL`, `FHOME_CLOUD_PASSWORD`, `FHOME_RESOURCE_PASSWORD`
//!
//! Optional:
//! - `GATEBOT_GATE_CELL_ID`: cell ID of the gate (default: 260)
//! - `GATEBOT_USER_NAMES`: `id=Name` pairs for reply personalization
//!
//! # Example
//!
//! ```no_run
//! use gatebot_core::config::Settings;
//! use gatebot_telegram::GateBot;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let client = gatebot_fhome::Client::connect(&settings.fhome).await?;
//!     GateBot::new(settings, client).run().await;
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod error;
pub mod handlers;
pub mod state;

pub use bot::GateBot;
pub use error::{BotError, Result};
pub use state::{create_shared_state, BotState};
