use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use crate::errors::TransportError;
use crate::events::{CampaignEvent, decode_event};

/// Connection lifecycle as observed by the UI.
///
/// Errors are carried as display strings: the consumer renders them in a
/// connectivity banner, not a retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempt has completed yet.
    Connecting,
    /// The channel is live.
    Open,
    /// Never connected, dropped, or rejected — all collapse here.
    Closed { error: Option<String> },
}

/// A single WebSocket connection to a campaign-scoped event channel.
///
/// The socket's lifetime is bound to the owning controller: call
/// [`CampaignSocket::close`] on teardown so the connection does not outlive
/// the view that opened it.
pub struct CampaignSocket {
    url: String,
    stream: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
    state: ConnectionState,
}

impl CampaignSocket {
    /// Create a socket for the given channel URL without connecting yet.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            stream: None,
            state: ConnectionState::Connecting,
        }
    }

    /// Open the connection. On success the state moves to `Open` and any
    /// stored error is cleared; on failure the error message is recorded and
    /// the socket stays closed.
    pub async fn connect(&mut self) -> Result<(), TransportError> {
        match connect_async(self.url.as_str()).await {
            Ok((stream, _response)) => {
                tracing::info!(url = %self.url, "campaign channel connected");
                self.stream = Some(stream);
                self.state = ConnectionState::Open;
                Ok(())
            }
            Err(source) => {
                tracing::warn!(url = %self.url, error = %source, "campaign channel connect failed");
                self.state = ConnectionState::Closed {
                    error: Some(source.to_string()),
                };
                Err(TransportError::ConnectFailed {
                    url: self.url.clone(),
                    source,
                })
            }
        }
    }

    /// Serialize and transmit a message, only if the channel is open.
    /// Otherwise the error is recorded locally and returned — fire-and-forget
    /// callers may ignore the result and read the state instead.
    pub async fn send<T: Serialize>(&mut self, message: &T) -> Result<(), TransportError> {
        let Some(stream) = self.stream.as_mut() else {
            self.record_error("WebSocket is not connected");
            return Err(TransportError::NotConnected);
        };
        let json = serde_json::to_string(message)?;
        if let Err(source) = stream.send(Message::Text(json.into())).await {
            self.record_error(&source.to_string());
            self.stream = None;
            return Err(TransportError::SendFailed(source));
        }
        Ok(())
    }

    /// Forcibly close any existing socket and open a fresh one with the same
    /// URL. The only recovery mechanism; always consumer-invoked.
    pub async fn reconnect(&mut self) -> Result<(), TransportError> {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.close(None).await;
        }
        self.state = ConnectionState::Connecting;
        self.connect().await
    }

    /// Next decoded event from the channel.
    ///
    /// Returns `None` once the connection has closed (cleanly or not); the
    /// state records which. Undecodable frames are logged and skipped so a
    /// misbehaving server cannot take the event loop down.
    pub async fn next_event(&mut self) -> Option<CampaignEvent> {
        loop {
            let Some(stream) = self.stream.as_mut() else {
                return None;
            };
            match stream.next().await {
                Some(Ok(Message::Text(text))) => match decode_event(&text) {
                    Ok(Some(event)) => return Some(event),
                    Ok(None) => continue,
                    Err(error) => {
                        tracing::warn!(%error, "dropping undecodable campaign event");
                        continue;
                    }
                },
                // Pongs are handled by the protocol layer; binary frames are
                // not part of the channel contract.
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Binary(_))) => continue,
                // Close frames, raw frames, or a finished stream all mean
                // the connection is gone.
                Some(Ok(_)) | None => {
                    tracing::info!(url = %self.url, "campaign channel closed");
                    self.stream = None;
                    self.state = ConnectionState::Closed { error: None };
                    return None;
                }
                Some(Err(source)) => {
                    tracing::warn!(url = %self.url, error = %source, "campaign channel error");
                    self.stream = None;
                    self.state = ConnectionState::Closed {
                        error: Some(source.to_string()),
                    };
                    return None;
                }
            }
        }
    }

    /// Best-effort close frame for teardown.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.close(None).await;
        }
        if self.state == ConnectionState::Open {
            self.state = ConnectionState::Closed { error: None };
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// The last recorded connection error, if any.
    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            ConnectionState::Closed { error } => error.as_deref(),
            _ => None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn record_error(&mut self, message: &str) {
        self.state = ConnectionState::Closed {
            error: Some(message.to_string()),
        };
    }
}
