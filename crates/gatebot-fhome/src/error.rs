//! Error types for the F&Home client.

use thiserror::Error;

/// Errors that can occur while talking to the F&Home cloud.
#[derive(Debug, Error)]
pub enum FhomeError {
    /// WebSocket transport failure (connect, send or receive).
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The cloud answered a request with a non-ok status.
    #[error("{action} rejected by the cloud with status {status:?}")]
    Rejected { action: String, status: String },

    /// The cloud closed the connection mid-exchange.
    #[error("connection closed by the cloud")]
    ConnectionClosed,

    /// A frame did not parse as the expected JSON shape.
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),

    /// The account has no resource to open a session to.
    #[error("the account has no registered resource")]
    NoResource,
}

/// Result type for F&Home operations.
pub type Result<T> = std::result::Result<T, FhomeError>;
