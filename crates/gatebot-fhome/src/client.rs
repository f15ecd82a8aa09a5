//! WebSocket client for the F&Home cloud.

use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

use gatebot_core::config::FhomeSettings;

use crate::error::{FhomeError, Result};
use crate::protocol::{
    request_token, CellReading, Envelope, Resource, StatusTouches, Value,
    ACTION_GET_MY_RESOURCES, ACTION_OPEN_CLIENT_SESSION, ACTION_OPEN_RESOURCE_SESSION,
    ACTION_STATUS_TOUCHES, ACTION_XEVENT,
};

/// The cloud's WebSocket endpoint.
const CLOUD_URL: &str = "wss://fhome.cloud/webapp-interface/";

/// One authenticated connection to the cloud.
struct Conn {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Conn {
    /// Send one request and wait for its response.
    ///
    /// The cloud pushes unsolicited frames on the same connection; anything
    /// that does not carry our token (or the expected action name) is
    /// skipped. A frame with a non-ok status is an error.
    async fn exchange(
        &mut self,
        mut request: serde_json::Value,
        action: &str,
    ) -> Result<serde_json::Value> {
        let token = request_token();
        if let Some(fields) = request.as_object_mut() {
            fields.insert("request_token".to_string(), json!(token));
        }
        self.ws.send(WsMessage::Text(request.to_string())).await?;

        while let Some(frame) = self.ws.next().await {
            match frame? {
                WsMessage::Text(text) => {
                    let value: serde_json::Value = serde_json::from_str(&text)?;
                    let envelope: Envelope = serde_json::from_value(value.clone())?;
                    let ours = envelope.request_token.as_deref() == Some(token.as_str())
                        || envelope.action_name == action;
                    if !ours {
                        trace!(action = %envelope.action_name, "skipping unsolicited frame");
                        continue;
                    }
                    return match envelope.status.as_deref() {
                        Some("ok") | None => Ok(value),
                        Some(status) => Err(FhomeError::Rejected {
                            action: action.to_string(),
                            status: status.to_string(),
                        }),
                    };
                }
                WsMessage::Ping(payload) => {
                    self.ws.send(WsMessage::Pong(payload)).await?;
                }
                WsMessage::Close(_) => return Err(FhomeError::ConnectionClosed),
                _ => {}
            }
        }

        Err(FhomeError::ConnectionClosed)
    }
}

/// An authenticated F&Home client, ready to send events and read status.
///
/// Read-only after [`Client::connect`] apart from the underlying socket;
/// callers serialize access (one update at a time).
pub struct Client {
    conn: Conn,
    resource: Resource,
}

impl Client {
    /// Connect to the cloud and run the three-step session handshake:
    /// open the client session, fetch the account's resource, then open
    /// the session to that resource.
    pub async fn connect(settings: &FhomeSettings) -> Result<Self> {
        let (ws, _) = connect_async(CLOUD_URL).await?;
        debug!(url = CLOUD_URL, "connected to the cloud");
        let mut conn = Conn { ws };

        conn.exchange(
            json!({
                "action_name": ACTION_OPEN_CLIENT_SESSION,
                "email": settings.email,
                "password": settings.cloud_password,
            }),
            ACTION_OPEN_CLIENT_SESSION,
        )
        .await?;
        debug!(email = %settings.email, "opened client session");

        let raw = conn
            .exchange(
                json!({ "action_name": ACTION_GET_MY_RESOURCES }),
                ACTION_GET_MY_RESOURCES,
            )
            .await?;
        let resource: Resource = serde_json::from_value(raw)?;
        if resource.unique_id.is_empty() {
            return Err(FhomeError::NoResource);
        }
        debug!(
            name = %resource.friendly_name,
            id = %resource.unique_id,
            kind = %resource.resource_type,
            "got resource"
        );

        conn.exchange(
            json!({
                "action_name": ACTION_OPEN_RESOURCE_SESSION,
                "email": settings.email,
                "unique_id": resource.unique_id,
                "password": settings.resource_password,
            }),
            ACTION_OPEN_RESOURCE_SESSION,
        )
        .await?;
        debug!("opened session to the resource");

        Ok(Self { conn, resource })
    }

    /// The resource this client is attached to.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Send one event to a cell and wait for the acknowledgement.
    pub async fn send_event(&mut self, cell_id: u32, value: Value) -> Result<()> {
        self.conn
            .exchange(
                json!({
                    "action_name": ACTION_XEVENT,
                    "cell_id": cell_id.to_string(),
                    "value": value.as_hex(),
                    "type": "HEX",
                }),
                ACTION_XEVENT,
            )
            .await?;
        debug!(cell_id, value = value.as_hex(), "event sent");
        Ok(())
    }

    /// Fetch the current cell values snapshot.
    pub async fn get_status_touches(&mut self) -> Result<Vec<CellReading>> {
        let raw = self
            .conn
            .exchange(
                json!({ "action_name": ACTION_STATUS_TOUCHES }),
                ACTION_STATUS_TOUCHES,
            )
            .await?;
        let status: StatusTouches = serde_json::from_value(raw)?;
        debug!(cells = status.response.cells.len(), "got status snapshot");
        Ok(status.response.cells)
    }
}

#[cfg(test)]
mod tests {
    // Exercising the client needs a live cloud endpoint; the frame shapes
    // and value mapping are covered in protocol.rs instead.
}
