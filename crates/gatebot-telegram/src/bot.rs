//! Main Telegram bot implementation.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use tracing::{debug, info};

use gatebot_core::config::Settings;
use gatebot_fhome::Client;

use crate::error::{BotError, Result};
use crate::handlers::handle_message;
use crate::state::{create_shared_state, BotState};

/// The gatebot Telegram bot.
pub struct GateBot {
    /// The teloxide bot instance.
    bot: Bot,
    /// Shared state across handlers.
    state: Arc<BotState>,
}

impl GateBot {
    /// Create a bot from startup settings and an authenticated F&Home
    /// client.
    pub fn new(settings: Settings, client: Client) -> Self {
        let bot = Bot::new(settings.telegram.bot_token.clone());
        let state = create_shared_state(settings, client);
        Self { bot, state }
    }

    /// Ask Telegram for the bot's username. Doubles as a token check.
    pub async fn username(&self) -> Result<String> {
        let me = self.bot.get_me().await.map_err(BotError::Telegram)?;
        Ok(me.username().to_string())
    }

    /// Run the bot in long-polling mode until interrupted.
    pub async fn run(self) {
        let state = Arc::clone(&self.state);

        let handler = dptree::entry().branch(Update::filter_message().endpoint(
            move |bot: Bot, msg: Message| {
                let state = Arc::clone(&state);
                async move { handle_message(bot, msg, state).await }
            },
        ));

        info!("bot is running");

        Dispatcher::builder(self.bot, handler)
            .default_handler(|upd| async move {
                debug!("update is not a message, ignoring: {:?}", upd);
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[cfg(test)]
mod tests {
    // Dispatch needs a live Telegram API; trigger classification and the
    // lighting report formatting are covered in handlers.rs.
}
