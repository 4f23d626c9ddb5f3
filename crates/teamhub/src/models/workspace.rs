//! Workspace model

use super::{Entity, ExtraFields};
use serde::{Deserialize, Serialize};

/// Workspace grouping folders and documents of a team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Workspace {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            public: false,
            owner_id: None,
            extra: ExtraFields::new(),
        }
    }
}

impl Entity for Workspace {
    fn id(&self) -> &str {
        &self.id
    }
}
