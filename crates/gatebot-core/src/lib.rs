//! Gatebot Core - shared building blocks for the gatebot bridge.
//!
//! This crate provides the pieces that do not depend on either external
//! service:
//!
//! - **config**: environment-variable settings and the chat/user allow-list
//! - **replies**: fixed reply texts and random confirmation selection

pub mod config;
pub mod replies;

pub use config::{AllowList, ConfigError, FhomeSettings, Settings, TelegramSettings};
