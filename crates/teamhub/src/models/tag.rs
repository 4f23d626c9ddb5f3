//! Tag model

use super::Entity;
use serde::{Deserialize, Serialize};

/// Label attached to documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl Entity for Tag {
    fn id(&self) -> &str {
        &self.id
    }
}
