//! REST API access used during event reconciliation

mod client;

pub use client::HttpApiClient;

use crate::error::SyncResult;
use crate::models::{Document, Folder, Template, Workspace};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which resources to fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcesQuery {
    /// Document and folder ids
    pub resources_ids: Vec<String>,
    pub workspaces_ids: Vec<String>,
    /// Ask the server for the reduced field set
    pub minimal: bool,
}

impl ResourcesQuery {
    pub fn is_empty(&self) -> bool {
        self.resources_ids.is_empty() && self.workspaces_ids.is_empty()
    }
}

/// Result of a resource fetch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesResponse {
    #[serde(default)]
    pub docs: Vec<Document>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TemplateResponse {
    pub template: Template,
}

/// Resource endpoints the event handlers depend on
#[async_trait]
pub trait ResourceApi: Send + Sync {
    async fn get_resources(
        &self,
        team_id: &str,
        query: &ResourcesQuery,
    ) -> SyncResult<ResourcesResponse>;

    async fn get_template(&self, template_id: &str) -> SyncResult<Template>;
}

/// Source of the bearer token attached to requests
pub trait AccessTokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// A token fixed at startup, possibly absent
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl AccessTokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocStatus;
    use serde_json::json;

    #[test]
    fn test_resources_batch_with_unknown_status() {
        let resources: ResourcesResponse = serde_json::from_value(json!({
            "docs": [
                { "id": "d1", "workspaceId": "ws-1", "status": "in_progress", "createdAt": "2024-05-01T10:00:00Z" },
                { "id": "d2", "workspaceId": "ws-1", "status": "blocked", "createdAt": "2024-05-01T10:00:00Z" }
            ],
            "workspaces": [{ "id": "ws-1", "name": "Product" }]
        }))
        .unwrap();

        assert_eq!(resources.docs.len(), 2);
        assert_eq!(resources.docs[0].status, Some(DocStatus::InProgress));
        assert_eq!(resources.docs[1].status, Some(DocStatus::Other("blocked".into())));
        assert!(resources.folders.is_empty());
    }

    #[test]
    fn test_query_is_empty() {
        assert!(ResourcesQuery::default().is_empty());
        let query = ResourcesQuery {
            resources_ids: vec!["d1".into()],
            ..Default::default()
        };
        assert!(!query.is_empty());
    }
}
