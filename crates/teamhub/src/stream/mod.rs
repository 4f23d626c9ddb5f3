//! Reconnecting push connection for one team
//!
//! One task owns the connection. State moves
//! `Disconnected -> Connecting -> Open`, falls to `Error` on any transport
//! failure, waits out the backoff delay and goes back to `Connecting`.
//! Cancellation is terminal and ends in `Closed`.

mod backoff;
mod transport;

pub use backoff::Backoff;
pub use transport::{ConnectRequest, EventTransport, SseTransport, TransportEvent, TransportStream};

use crate::api::AccessTokenProvider;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::events::EventDispatcher;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Lifecycle of the push connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Error,
    /// Torn down; no further reconnects
    Closed,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Open => write!(f, "open"),
            ConnectionState::Error => write!(f, "error"),
            ConnectionState::Closed => write!(f, "closed"),
        }
    }
}

enum ConnectionOutcome {
    Failed(String),
    Cancelled,
}

/// Push event client for one team
pub struct EventStream {
    team_id: String,
    url: String,
    transport: Arc<dyn EventTransport>,
    token: Arc<dyn AccessTokenProvider>,
    dispatcher: Arc<EventDispatcher>,
    backoff: Backoff,
    state_tx: watch::Sender<ConnectionState>,
}

impl EventStream {
    pub fn new(
        team_id: impl Into<String>,
        sse_base_url: &str,
        transport: Arc<dyn EventTransport>,
        token: Arc<dyn AccessTokenProvider>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        let team_id = team_id.into();
        let url = format!("{}/events/{}", sse_base_url.trim_end_matches('/'), team_id);
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            team_id,
            url,
            transport,
            token,
            dispatcher,
            backoff: Backoff::default(),
            state_tx,
        }
    }

    /// Stream for the team named in `config`, with its backoff bounds
    pub fn from_config(
        config: &SyncConfig,
        transport: Arc<dyn EventTransport>,
        token: Arc<dyn AccessTokenProvider>,
        dispatcher: Arc<EventDispatcher>,
    ) -> SyncResult<Self> {
        let team_id = config
            .team_id
            .clone()
            .ok_or_else(|| SyncError::Config("team_id is required to open the event stream".into()))?;
        Ok(
            Self::new(team_id, &config.sse_base_url, transport, token, dispatcher).with_backoff(
                Backoff::new(config.reconnect_initial(), config.reconnect_max()),
            ),
        )
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Watch connection state changes
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    fn set_state(&self, state: ConnectionState) {
        self.state_tx.send_replace(state);
    }

    /// Keep the connection alive until `cancel` fires.
    ///
    /// Errors are never returned: every failure schedules a reconnect.
    /// Cancelling drops the live connection and any event still being
    /// applied, so nothing is written to the stores after teardown.
    pub async fn run(mut self, cancel: CancellationToken) {
        info!("Starting event stream for team {} at {}", self.team_id, self.url);

        loop {
            self.set_state(ConnectionState::Connecting);
            let request = ConnectRequest {
                url: self.url.clone(),
                bearer_token: self.token.access_token(),
            };

            let outcome = tokio::select! {
                _ = cancel.cancelled() => ConnectionOutcome::Cancelled,
                outcome = self.run_connection(&request) => outcome,
            };

            let reason = match outcome {
                ConnectionOutcome::Cancelled => break,
                ConnectionOutcome::Failed(reason) => reason,
            };

            self.set_state(ConnectionState::Error);
            let delay = self.backoff.next_delay();
            warn!(
                "Event stream for team {} failed: {}; reconnecting in {:?}",
                self.team_id, reason, delay
            );

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        self.set_state(ConnectionState::Closed);
        info!("Event stream for team {} closed", self.team_id);
    }

    async fn run_connection(&mut self, request: &ConnectRequest) -> ConnectionOutcome {
        let mut events = match self.transport.connect(request).await {
            Ok(events) => events,
            Err(err) => return ConnectionOutcome::Failed(err.to_string()),
        };

        while let Some(event) = events.next().await {
            match event {
                TransportEvent::Open => {
                    self.backoff.reset();
                    self.set_state(ConnectionState::Open);
                    info!("Event stream for team {} open", self.team_id);
                }
                TransportEvent::Message(raw) => self.dispatcher.handle_message(&raw).await,
                TransportEvent::Error(reason) => return ConnectionOutcome::Failed(reason),
            }
        }

        ConnectionOutcome::Failed("stream ended".to_string())
    }
}
