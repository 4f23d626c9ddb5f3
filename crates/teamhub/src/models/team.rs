//! Team, membership and subscription models

use super::{Entity, ExtraFields};
use crate::error::SyncResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Team entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<UserPermissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            permissions: Vec::new(),
            subscription: None,
            extra: ExtraFields::new(),
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<UserPermissions>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Shallow-merge a partial team payload into a copy of this team.
    ///
    /// Top-level keys of `patch` replace the team's keys; nested objects are
    /// not merged.
    pub fn merged_with(&self, patch: &ExtraFields) -> SyncResult<Team> {
        let mut base = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => ExtraFields::new(),
        };
        for (key, value) in patch {
            base.insert(key.clone(), value.clone());
        }
        Ok(serde_json::from_value(Value::Object(base))?)
    }
}

impl Entity for Team {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A team member as seen from the permission list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl User {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            extra: ExtraFields::new(),
        }
    }
}

/// Membership of one user in one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPermissions {
    pub id: String,
    #[serde(default)]
    pub role: String,
    pub user: User,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl UserPermissions {
    pub fn new(id: impl Into<String>, role: impl Into<String>, user: User) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            user,
            extra: ExtraFields::new(),
        }
    }
}

impl Entity for UserPermissions {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Billing subscription of a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<u32>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Subscription {
    pub fn is_inactive(&self) -> bool {
        self.status == "inactive"
    }
}
