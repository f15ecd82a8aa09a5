//! Environment-variable configuration for gatebot.
//!
//! All settings are read once at startup; a missing required variable or an
//! unparsable ID list aborts the process with a descriptive error.
//!
//! # Environment Variables
//!
//! Required:
//! - `TELEGRAM_BOT_TOKEN`: bot token from @BotFather
//! - `TELEGRAM_BOT_USERNAME`: the bot's own username (group-join detection)
//! - `TELEGRAM_ALLOWED_CHAT_IDS`: comma-separated group chat IDs
//! - `TELEGRAM_ALLOWED_USER_IDS`: comma-separated user IDs (private chats)
//! - `FHOME_EMAIL`: F&Home cloud account email
//! - `FHOME_CLOUD_PASSWORD`: F&Home cloud password
//! - `FHOME_RESOURCE_PASSWORD`: password of the resource (the house)
//!
//! Optional:
//! - `GATEBOT_GATE_CELL_ID`: numeric cell ID of the gate (default: 260)
//! - `GATEBOT_USER_NAMES`: `id=Name` pairs, comma-separated, used to
//!   address known senders by name in confirmation replies

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

/// Cell ID of the gate when `GATEBOT_GATE_CELL_ID` is not set.
const DEFAULT_GATE_CELL_ID: u32 = 260;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} is empty. Set the {0} environment variable.")]
    MissingVar(&'static str),

    /// An entry of an ID list did not parse as an integer.
    #[error("invalid ID {entry:?} in {var}")]
    InvalidId { var: &'static str, entry: String },

    /// An allow-list variable parsed to zero entries.
    #[error("{0} contains no IDs; the bot would reject every chat")]
    EmptyAllowList(&'static str),

    /// A `GATEBOT_USER_NAMES` entry is not of the form `id=Name`.
    #[error("invalid entry {entry:?} in GATEBOT_USER_NAMES, expected id=Name")]
    InvalidUserName { entry: String },

    /// `GATEBOT_GATE_CELL_ID` did not parse as a number.
    #[error("invalid GATEBOT_GATE_CELL_ID {0:?}")]
    InvalidCellId(String),
}

/// Telegram-side settings.
#[derive(Debug, Clone)]
pub struct TelegramSettings {
    /// Bot token from @BotFather.
    pub bot_token: String,
    /// The bot's own username, without the leading `@`.
    pub bot_username: String,
    /// Chats and users permitted to trigger actions.
    pub allow_list: AllowList,
}

/// F&Home cloud credentials.
#[derive(Debug, Clone)]
pub struct FhomeSettings {
    /// Cloud account email.
    pub email: String,
    /// Cloud account password.
    pub cloud_password: String,
    /// Password of the resource (the house) itself.
    pub resource_password: String,
}

/// All settings read at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub telegram: TelegramSettings,
    pub fhome: FhomeSettings,
    /// Cell ID the gate toggle is sent to.
    pub gate_cell_id: u32,
    /// Optional user ID -> given name map for reply personalization.
    pub user_names: HashMap<u64, String>,
}

impl Settings {
    /// Read and validate all settings from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let telegram = TelegramSettings {
            bot_token: required("TELEGRAM_BOT_TOKEN")?,
            bot_username: required("TELEGRAM_BOT_USERNAME")?,
            allow_list: AllowList {
                chat_ids: parse_id_list("TELEGRAM_ALLOWED_CHAT_IDS", &required("TELEGRAM_ALLOWED_CHAT_IDS")?)?,
                user_ids: parse_id_list("TELEGRAM_ALLOWED_USER_IDS", &required("TELEGRAM_ALLOWED_USER_IDS")?)?,
            },
        };

        let fhome = FhomeSettings {
            email: required("FHOME_EMAIL")?,
            cloud_password: required("FHOME_CLOUD_PASSWORD")?,
            resource_password: required("FHOME_RESOURCE_PASSWORD")?,
        };

        let gate_cell_id = match std::env::var("GATEBOT_GATE_CELL_ID") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidCellId(raw))?,
            _ => DEFAULT_GATE_CELL_ID,
        };

        let user_names = match std::env::var("GATEBOT_USER_NAMES") {
            Ok(raw) => parse_user_names(&raw)?,
            Err(_) => HashMap::new(),
        };

        debug!(
            allowed_chats = telegram.allow_list.chat_ids.len(),
            allowed_users = telegram.allow_list.user_ids.len(),
            gate_cell_id,
            known_names = user_names.len(),
            "settings loaded"
        );

        Ok(Self {
            telegram,
            fhome,
            gate_cell_id,
            user_names,
        })
    }
}

/// Read a required variable; empty counts as missing.
fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Parse a comma-separated list of integer IDs. Whitespace around entries
/// is tolerated; an empty list is an error.
pub fn parse_id_list<T: std::str::FromStr>(
    var: &'static str,
    raw: &str,
) -> Result<Vec<T>, ConfigError> {
    let mut ids = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let id = entry.parse().map_err(|_| ConfigError::InvalidId {
            var,
            entry: entry.to_string(),
        })?;
        ids.push(id);
    }
    if ids.is_empty() {
        return Err(ConfigError::EmptyAllowList(var));
    }
    Ok(ids)
}

/// Parse `GATEBOT_USER_NAMES`: comma-separated `id=Name` pairs.
pub fn parse_user_names(raw: &str) -> Result<HashMap<u64, String>, ConfigError> {
    let mut names = HashMap::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let invalid = || ConfigError::InvalidUserName {
            entry: entry.to_string(),
        };
        let (id, name) = entry.split_once('=').ok_or_else(invalid)?;
        let id: u64 = id.trim().parse().map_err(|_| invalid())?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }
        names.insert(id, name.to_string());
    }
    Ok(names)
}

/// Fixed set of chats and users permitted to trigger actions.
///
/// A message is authorized iff it arrives in an allow-listed group chat, or
/// in a private chat from an allow-listed user.
#[derive(Debug, Clone)]
pub struct AllowList {
    chat_ids: Vec<i64>,
    user_ids: Vec<u64>,
}

impl AllowList {
    /// Build an allow-list from explicit ID lists.
    pub fn new(chat_ids: Vec<i64>, user_ids: Vec<u64>) -> Self {
        Self { chat_ids, user_ids }
    }

    /// Whether a group chat with this ID may trigger actions.
    pub fn permits_group(&self, chat_id: i64) -> bool {
        self.chat_ids.contains(&chat_id)
    }

    /// Whether this user may trigger actions from a private chat.
    pub fn permits_user(&self, user_id: u64) -> bool {
        self.user_ids.contains(&user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list_valid() {
        let ids: Vec<i64> = parse_id_list("TEST", "-100123, 42 ,7").unwrap();
        assert_eq!(ids, vec![-100123, 42, 7]);
    }

    #[test]
    fn test_parse_id_list_garbage() {
        let err = parse_id_list::<i64>("TEST", "12,abc").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidId { entry, .. } if entry == "abc"));
    }

    #[test]
    fn test_parse_id_list_empty() {
        let err = parse_id_list::<i64>("TEST", " , ").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAllowList("TEST")));
    }

    #[test]
    fn test_parse_user_names() {
        let names = parse_user_names("123=Tom, 456 = Ann").unwrap();
        assert_eq!(names.get(&123), Some(&"Tom".to_string()));
        assert_eq!(names.get(&456), Some(&"Ann".to_string()));
        assert!(names.get(&789).is_none());
    }

    #[test]
    fn test_parse_user_names_rejects_bad_entries() {
        assert!(parse_user_names("123").is_err());
        assert!(parse_user_names("abc=Tom").is_err());
        assert!(parse_user_names("123=").is_err());
    }

    #[test]
    fn test_allow_list_membership() {
        let allow = AllowList::new(vec![-100500], vec![42]);
        assert!(allow.permits_group(-100500));
        assert!(!allow.permits_group(42));
        assert!(allow.permits_user(42));
        assert!(!allow.permits_user(7));
    }
}
