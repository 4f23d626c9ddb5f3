//! Team document model

use super::{Entity, ExtraFields, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of a document.
///
/// Statuses this client does not know decode as `Other` and keep their wire
/// value, so one unfamiliar document never fails a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocStatus {
    InProgress,
    InReview,
    Completed,
    Archived,
    Other(String),
}

impl DocStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DocStatus::InProgress => "in_progress",
            DocStatus::InReview => "in_review",
            DocStatus::Completed => "completed",
            DocStatus::Archived => "archived",
            DocStatus::Other(other) => other,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DocStatus::Other(_))
    }
}

impl From<&str> for DocStatus {
    fn from(value: &str) -> Self {
        match value {
            "in_progress" => DocStatus::InProgress,
            "in_review" => DocStatus::InReview,
            "completed" => DocStatus::Completed,
            "archived" => DocStatus::Archived,
            other => DocStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for DocStatus {
    fn from(value: String) -> Self {
        DocStatus::from(value.as_str())
    }
}

impl From<DocStatus> for String {
    fn from(status: DocStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for DocStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocStatus {
    type Err = String;

    /// Parse one of the known statuses
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match DocStatus::from(s) {
            DocStatus::Other(_) => Err(format!("Invalid document status: {}", s)),
            status => Ok(status),
        }
    }
}

/// A user assigned to a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub user_id: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Assignee {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            extra: ExtraFields::new(),
        }
    }
}

/// Team document as cached by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub workspace_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_pathname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<DocStatus>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Document {
    /// Create a document with only the required fields set
    pub fn new(
        id: impl Into<String>,
        workspace_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            workspace_id: workspace_id.into(),
            parent_folder_id: None,
            folder_pathname: None,
            title: None,
            status: None,
            tags: Vec::new(),
            assignees: Vec::new(),
            due_date: None,
            created_at,
            updated_at: Some(created_at),
            archived_at: None,
            extra: ExtraFields::new(),
        }
    }

    pub fn with_status(mut self, status: DocStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_assignee(mut self, user_id: impl Into<String>) -> Self {
        self.assignees.push(Assignee::new(user_id));
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_updated_at(mut self, updated_at: Option<DateTime<Utc>>) -> Self {
        self.updated_at = updated_at;
        self
    }
}

impl Entity for Document {
    fn id(&self) -> &str {
        &self.id
    }
}
