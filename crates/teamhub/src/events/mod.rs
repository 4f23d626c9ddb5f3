//! Server-pushed app events
//!
//! Events arrive as JSON envelopes `{id, type, teamId, userId?, data}`. The
//! `type` selects one handler family; `data` stays untyped until the handler
//! reads the fields it needs.

mod dispatch;
mod kind;

pub use dispatch::EventDispatcher;
pub use kind::{EventKind, HandlerFamily};

use crate::error::{SyncError, SyncResult};
use crate::models::Entity;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded app event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub team_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AppEvent {
    /// Decode an event from a push message body
    pub fn decode(raw: &str) -> SyncResult<Self> {
        serde_json::from_str(raw).map_err(|e| SyncError::Decode(e.to_string()))
    }

    /// Read an optional field of `data`; `null` counts as absent
    pub fn data_field<T: DeserializeOwned>(&self, key: &str) -> SyncResult<Option<T>> {
        match self.data.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| SyncError::invalid_payload(self.kind.as_str(), format!("{}: {}", key, e))),
        }
    }

    /// Read a field of `data` that the event cannot be handled without
    pub fn required_field<T: DeserializeOwned>(&self, key: &str) -> SyncResult<T> {
        self.data_field(key)?.ok_or_else(|| {
            SyncError::invalid_payload(self.kind.as_str(), format!("missing field `{}`", key))
        })
    }
}

impl Entity for AppEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// External store that consumes a family of events on its own
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &AppEvent);
}
