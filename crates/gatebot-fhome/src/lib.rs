//! Thin client for the F&Home home-automation cloud.
//!
//! Only the surface gatebot consumes is implemented: one WebSocket
//! connection, the three-step session handshake, a single event send (the
//! gate toggle) and a status snapshot fetch (the lighting query). Nothing
//! is retried; a failed call surfaces as an [`FhomeError`].
//!
//! # Example
//!
//! ```no_run
//! use gatebot_core::config::FhomeSettings;
//! use gatebot_fhome::{Client, Value};
//!
//! # async fn run(settings: FhomeSettings) -> gatebot_fhome::Result<()> {
//! let mut client = Client::connect(&settings).await?;
//! client.send_event(260, Value::Toggle).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod protocol;

pub use client::Client;
pub use error::{FhomeError, Result};
pub use protocol::{lighting_percent, CellReading, Resource, Value};
