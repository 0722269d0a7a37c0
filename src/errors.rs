//! Typed error hierarchy for the sync client.
//!
//! Three top-level enums cover the three subsystems:
//! - `TransportError` — WebSocket connect/send failures
//! - `ApiError` — REST request, status, and decode failures
//! - `SyncError` — controller-level failures seen by user actions

use thiserror::Error;

/// Errors from the WebSocket transport wrapper.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to connect to {url}: {source}")]
    ConnectFailed {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },

    #[error("WebSocket is not connected")]
    NotConnected,

    #[error("Failed to send on WebSocket: {0}")]
    SendFailed(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("Failed to encode outbound message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from the REST data accessor.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Resource at {url} not found")]
    NotFound { url: String },

    #[error("Server returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Campaign state is not loaded yet")]
    NotLoaded,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors surfaced by the dashboard controller.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Initial campaign load failed: {0}")]
    LoadFailed(#[source] ApiError),

    #[error("Controller is shut down; response discarded")]
    ShutDown,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
