//! Error types for the client core

use thiserror::Error;

/// Result type alias for client core operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Client core error types
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid payload for {event_type}: {reason}")]
    InvalidPayload { event_type: String, reason: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SyncError::Status {
                status: status.as_u16(),
                url: err
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "<unknown>".to_string()),
            },
            None => SyncError::Http(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::Config(err.to_string())
    }
}

impl SyncError {
    /// Stable error code, used in log fields
    pub fn code(&self) -> &'static str {
        match self {
            SyncError::Http(_) => "HTTP_ERROR",
            SyncError::Status { .. } => "UNEXPECTED_STATUS",
            SyncError::Decode(_) => "DECODE_ERROR",
            SyncError::InvalidPayload { .. } => "INVALID_PAYLOAD",
            SyncError::Transport(_) => "TRANSPORT_ERROR",
            SyncError::Config(_) => "CONFIG_ERROR",
            SyncError::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the error came from the network rather than from local data
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            SyncError::Http(_) | SyncError::Status { .. } | SyncError::Transport(_)
        )
    }

    pub(crate) fn invalid_payload(event_type: impl Into<String>, reason: impl ToString) -> Self {
        SyncError::InvalidPayload {
            event_type: event_type.into(),
            reason: reason.to_string(),
        }
    }
}
