//! Wire types for the F&Home cloud protocol.
//!
//! Every exchange is a JSON text frame with an `action_name` and a random
//! `request_token`; the cloud echoes the token back and reports `"ok"` in
//! `status` on success. Cell values travel as hex strings (`"0x...."`).

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;

/// Length of the random `request_token` correlating request and response.
const REQUEST_TOKEN_LEN: usize = 13;

/// Lowest internal value code of the lighting band (0%).
pub const LIGHTING_MIN: u32 = 0x6000;

/// Highest internal value code of the lighting band (100%).
pub const LIGHTING_MAX: u32 = 0x6064;

// Action names understood by this client.
pub const ACTION_OPEN_CLIENT_SESSION: &str = "open_client_session";
pub const ACTION_GET_MY_RESOURCES: &str = "get_my_resources";
pub const ACTION_OPEN_RESOURCE_SESSION: &str = "open_client_to_resource_session";
pub const ACTION_XEVENT: &str = "xevent";
pub const ACTION_STATUS_TOUCHES: &str = "statustouches";

/// A value sent with an `xevent` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// Flip a switch-like cell (the gate). Stateless on our side.
    Toggle,
}

impl Value {
    /// The hex string the cloud expects for this value.
    pub fn as_hex(self) -> &'static str {
        match self {
            Value::Toggle => "0x4001",
        }
    }
}

/// Generate a random request token.
pub fn request_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REQUEST_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Map an internal lighting value code linearly to a percentage.
///
/// Codes in `0x6000..=0x6064` map to `0..=100`; anything else is not a
/// lighting reading.
pub fn lighting_percent(code: u32) -> Option<u8> {
    if (LIGHTING_MIN..=LIGHTING_MAX).contains(&code) {
        Some((code - LIGHTING_MIN) as u8)
    } else {
        None
    }
}

/// Parse a `"0x...."` hex value string.
pub fn parse_hex(value: &str) -> Option<u32> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))?;
    u32::from_str_radix(digits, 16).ok()
}

/// Common fields of every frame the cloud sends.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub action_name: String,
    #[serde(default)]
    pub request_token: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// The account's resource, from the `get_my_resources` response.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    #[serde(rename = "friendly_name_0", default)]
    pub friendly_name: String,
    #[serde(rename = "unique_id_0", default)]
    pub unique_id: String,
    #[serde(rename = "resource_type_0", default)]
    pub resource_type: String,
}

/// Payload of a `statustouches` response.
#[derive(Debug, Default, Deserialize)]
pub struct StatusTouches {
    #[serde(default)]
    pub response: StatusTouchesPayload,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusTouchesPayload {
    #[serde(default)]
    pub cells: Vec<CellReading>,
}

/// One cell's current value from the status snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct CellReading {
    #[serde(rename = "id", default)]
    pub cell_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl CellReading {
    /// The lighting percentage of this cell, if its value is in the
    /// lighting band.
    pub fn lighting_percent(&self) -> Option<u8> {
        lighting_percent(parse_hex(&self.value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_wire_value() {
        assert_eq!(Value::Toggle.as_hex(), "0x4001");
    }

    #[test]
    fn test_request_token_shape() {
        let token = request_token();
        assert_eq!(token.len(), 13);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_lighting_percent_boundaries() {
        assert_eq!(lighting_percent(0x6000), Some(0));
        assert_eq!(lighting_percent(0x6032), Some(50));
        assert_eq!(lighting_percent(0x6064), Some(100));
        assert_eq!(lighting_percent(0x5FFF), None);
        assert_eq!(lighting_percent(0x6065), None);
        assert_eq!(lighting_percent(0x4001), None);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0x6046"), Some(0x6046));
        assert_eq!(parse_hex("0X4001"), Some(0x4001));
        assert_eq!(parse_hex("6046"), None);
        assert_eq!(parse_hex("0xZZ"), None);
    }

    #[test]
    fn test_resource_frame_parses() {
        let raw = r#"{
            "action_name": "get_my_resources",
            "request_token": "abcdefghjklmn",
            "status": "ok",
            "friendly_name_0": "Our House",
            "unique_id_0": "12345678",
            "resource_type_0": "mobile"
        }"#;
        let resource: Resource = serde_json::from_str(raw).unwrap();
        assert_eq!(resource.friendly_name, "Our House");
        assert_eq!(resource.unique_id, "12345678");
        assert_eq!(resource.resource_type, "mobile");
    }

    #[test]
    fn test_status_touches_frame_parses() {
        let raw = r#"{
            "action_name": "statustouches",
            "status": "ok",
            "response": {
                "cells": [
                    {"id": "291", "name": "Kitchen lamp", "value": "0x6032"},
                    {"id": "260", "name": "Gate", "value": "0x4001"}
                ]
            }
        }"#;
        let status: StatusTouches = serde_json::from_str(raw).unwrap();
        assert_eq!(status.response.cells.len(), 2);
        assert_eq!(status.response.cells[0].lighting_percent(), Some(50));
        assert_eq!(status.response.cells[1].lighting_percent(), None);
    }
}
