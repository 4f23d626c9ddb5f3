//! Document template model

use super::{Entity, ExtraFields};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Entity for Template {
    fn id(&self) -> &str {
        &self.id
    }
}
