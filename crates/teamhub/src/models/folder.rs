//! Team folder model for document organization

use super::{Entity, ExtraFields};
use serde::{Deserialize, Serialize};

/// Folder inside a workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub workspace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Folder {
    pub fn new(id: impl Into<String>, workspace_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            workspace_id: workspace_id.into(),
            parent_folder_id: None,
            name: name.into(),
            pathname: None,
            extra: ExtraFields::new(),
        }
    }
}

impl Entity for Folder {
    fn id(&self) -> &str {
        &self.id
    }
}
