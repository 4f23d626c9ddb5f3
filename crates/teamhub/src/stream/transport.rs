//! Push connection transports

use crate::error::{SyncError, SyncResult};
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// What a live connection reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection is established
    Open,
    /// One message body
    Message(String),
    /// The connection failed; the stream should be considered dead
    Error(String),
}

/// Parameters of one connection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub url: String,
    pub bearer_token: Option<String>,
}

pub type TransportStream = BoxStream<'static, TransportEvent>;

/// Opens push connections. Dropping the returned stream closes the connection.
#[async_trait]
pub trait EventTransport: Send + Sync {
    async fn connect(&self, request: &ConnectRequest) -> SyncResult<TransportStream>;
}

/// Server-sent events over HTTP
#[derive(Clone)]
pub struct SseTransport {
    http: Client,
}

impl SseTransport {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Client without an overall request timeout, which would cut the stream
    pub fn with_connect_timeout(connect_timeout: Duration) -> SyncResult<Self> {
        let http = Client::builder().connect_timeout(connect_timeout).build()?;
        Ok(Self::new(http))
    }
}

fn is_message_event(event_type: &str) -> bool {
    event_type.is_empty() || event_type == "message"
}

#[async_trait]
impl EventTransport for SseTransport {
    async fn connect(&self, request: &ConnectRequest) -> SyncResult<TransportStream> {
        let mut builder = self
            .http
            .get(&request.url)
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SyncError::Transport(format!("Failed to connect to {}: {}", request.url, e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
                url: request.url.clone(),
            });
        }

        let messages = response
            .bytes_stream()
            .eventsource()
            .filter_map(|item| async move {
                match item {
                    Ok(event) if is_message_event(&event.event) => {
                        Some(TransportEvent::Message(event.data))
                    }
                    Ok(event) => {
                        debug!("Ignoring server-sent event of type {}", event.event);
                        None
                    }
                    Err(err) => Some(TransportEvent::Error(err.to_string())),
                }
            });

        Ok(stream::once(async { TransportEvent::Open })
            .chain(messages)
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_event_types() {
        assert!(is_message_event(""));
        assert!(is_message_event("message"));
        assert!(!is_message_event("ping"));
    }
}
