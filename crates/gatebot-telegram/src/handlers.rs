//! The default update handler: greeting, allow-list check and triggers.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{debug, error, info, warn};

use gatebot_core::replies;
use gatebot_fhome::{CellReading, Value};

use crate::state::BotState;

/// Trigger phrase for the gate toggle.
const GATE_KEYWORD: &str = "gate";

/// Trigger phrase for the lighting status query.
const LIGHTS_KEYWORD: &str = "light";

/// What a message asks the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Toggle the gate.
    Gate,
    /// Report current lighting levels.
    Lights,
}

/// Classify a message text by case-insensitive substring match.
pub fn classify(text: &str) -> Option<Trigger> {
    let lower = text.to_lowercase();
    if lower.contains(GATE_KEYWORD) {
        Some(Trigger::Gate)
    } else if lower.contains(LIGHTS_KEYWORD) {
        Some(Trigger::Lights)
    } else {
        None
    }
}

/// Format the lighting status reply, one line per readable lamp.
pub fn format_lighting_report(cells: &[CellReading]) -> String {
    let lines: Vec<String> = cells
        .iter()
        .filter_map(|cell| {
            let percent = cell.lighting_percent()?;
            let name = if cell.name.is_empty() {
                &cell.cell_id
            } else {
                &cell.name
            };
            Some(format!("{name}: {percent}%"))
        })
        .collect();

    if lines.is_empty() {
        replies::NO_LAMPS.to_string()
    } else {
        format!("Current lights:\n{}", lines.join("\n"))
    }
}

/// Handle one message update end to end.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    info!(chat_id = msg.chat.id.0, "start processing message");

    // When the bot itself is added to a group, greet and log the group ID
    // so it can be allow-listed. Other members joining are none of our
    // business.
    if let Some(members) = msg.new_chat_members() {
        let Some(first) = members.first() else {
            return Ok(());
        };
        if first.username.as_deref() != Some(state.settings.telegram.bot_username.as_str()) {
            debug!(new_username = ?first.username, "someone else joined the group, ignoring");
            return Ok(());
        }
        info!(
            group_title = ?msg.chat.title(),
            group_id = msg.chat.id.0,
            "added to group"
        );
        let added_by = msg
            .from
            .as_ref()
            .map(|u| u.full_name())
            .unwrap_or_else(|| "someone".to_string());
        bot.send_message(msg.chat.id, replies::group_greeting(&added_by))
            .await?;
        return Ok(());
    }

    let Some(user) = msg.from.as_ref() else {
        debug!(chat_id = msg.chat.id.0, "message has no sender, ignoring");
        return Ok(());
    };
    let Some(text) = msg.text() else {
        debug!(chat_id = msg.chat.id.0, "message has no text, ignoring");
        return Ok(());
    };
    info!(
        chat_id = msg.chat.id.0,
        user_id = user.id.0,
        username = ?user.username,
        text = %text,
        "message received"
    );

    let allow = &state.settings.telegram.allow_list;
    let is_group = msg.chat.is_group() || msg.chat.is_supergroup();
    let authorized = (is_group && allow.permits_group(msg.chat.id.0))
        || (msg.chat.is_private() && allow.permits_user(user.id.0));
    if !authorized {
        warn!(
            chat_id = msg.chat.id.0,
            chat_title = ?msg.chat.title(),
            user_id = user.id.0,
            "message from a chat outside the allow-list"
        );
        bot.send_message(msg.chat.id, replies::NOT_ALLOWED).await?;
        return Ok(());
    }

    match classify(text) {
        Some(Trigger::Gate) => {
            let result = {
                let mut client = state.fhome.lock().await;
                client
                    .send_event(state.settings.gate_cell_id, Value::Toggle)
                    .await
            };
            match result {
                Ok(()) => {
                    let name = state
                        .settings
                        .user_names
                        .get(&user.id.0)
                        .map(String::as_str);
                    bot.send_message(msg.chat.id, replies::gate_confirmation(name))
                        .await?;
                    info!(
                        chat_id = msg.chat.id.0,
                        cell_id = state.settings.gate_cell_id,
                        "gate toggled"
                    );
                }
                Err(e) => {
                    error!(error = %e, "failed to toggle the gate");
                    bot.send_message(msg.chat.id, replies::gate_failure(&e.to_string()))
                        .await?;
                }
            }
        }
        Some(Trigger::Lights) => {
            let result = {
                let mut client = state.fhome.lock().await;
                client.get_status_touches().await
            };
            match result {
                Ok(cells) => {
                    bot.send_message(msg.chat.id, format_lighting_report(&cells))
                        .await?;
                    info!(chat_id = msg.chat.id.0, "lighting report sent");
                }
                Err(e) => {
                    error!(error = %e, "failed to read the lights");
                    bot.send_message(msg.chat.id, replies::lights_failure(&e.to_string()))
                        .await?;
                }
            }
        }
        None => {
            bot.send_message(msg.chat.id, replies::FALLBACK).await?;
        }
    }

    info!(chat_id = msg.chat.id.0, "end processing message");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_gate() {
        assert_eq!(classify("open the gate please"), Some(Trigger::Gate));
        assert_eq!(classify("GATE!"), Some(Trigger::Gate));
    }

    #[test]
    fn test_classify_lights() {
        assert_eq!(classify("how are the lights?"), Some(Trigger::Lights));
        assert_eq!(classify("Light status"), Some(Trigger::Lights));
    }

    #[test]
    fn test_classify_gate_wins_over_lights() {
        assert_eq!(classify("gate and lights"), Some(Trigger::Gate));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("hello there"), None);
        assert_eq!(classify(""), None);
    }

    fn reading(id: &str, name: &str, value: &str) -> CellReading {
        CellReading {
            cell_id: id.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_lighting_report_lists_lamps_only() {
        let cells = vec![
            reading("291", "Kitchen", "0x6046"),
            reading("260", "Gate", "0x4001"),
            reading("292", "", "0x6000"),
        ];
        let report = format_lighting_report(&cells);
        assert!(report.contains("Kitchen: 70%"));
        assert!(report.contains("292: 0%"));
        assert!(!report.contains("Gate"));
    }

    #[test]
    fn test_lighting_report_without_lamps() {
        let cells = vec![reading("260", "Gate", "0x4001")];
        assert_eq!(
            format_lighting_report(&cells),
            gatebot_core::replies::NO_LAMPS
        );
    }
}
