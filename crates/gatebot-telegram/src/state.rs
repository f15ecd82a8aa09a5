//! Shared state for the Telegram bot.

use std::sync::Arc;

use tokio::sync::Mutex;

use gatebot_core::config::Settings;
use gatebot_fhome::Client;

/// State shared across all handler invocations.
///
/// The F&Home client is the one long-lived authenticated handle; the mutex
/// serializes remote calls, so updates are effectively handled one at a
/// time as far as the backend is concerned.
pub struct BotState {
    /// Settings read at startup, read-only afterwards.
    pub settings: Settings,
    /// The authenticated F&Home client.
    pub fhome: Mutex<Client>,
}

/// Create the shared state handed to the dispatcher.
pub fn create_shared_state(settings: Settings, client: Client) -> Arc<BotState> {
    Arc::new(BotState {
        settings,
        fhome: Mutex::new(client),
    })
}
