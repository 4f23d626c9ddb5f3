//! HTTP implementation of the resource endpoints

use super::{AccessTokenProvider, ResourceApi, ResourcesQuery, ResourcesResponse, TemplateResponse};
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::models::Template;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use tracing::debug;

/// Resource API client backed by `reqwest`
#[derive(Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: String,
    token: Arc<dyn AccessTokenProvider>,
}

impl HttpApiClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Arc<dyn AccessTokenProvider>,
        http: Client,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build a client from configuration
    pub fn from_config(config: &SyncConfig, token: Arc<dyn AccessTokenProvider>) -> SyncResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::new(config.api_base_url.clone(), token, http))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> SyncResult<T> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Query pairs with one entry per id, the way the resources endpoint expects
fn resources_query_pairs(query: &ResourcesQuery) -> Vec<(&'static str, String)> {
    let mut pairs: Vec<(&'static str, String)> = query
        .resources_ids
        .iter()
        .map(|id| ("resourcesIds", id.clone()))
        .chain(
            query
                .workspaces_ids
                .iter()
                .map(|id| ("workspacesIds", id.clone())),
        )
        .collect();
    if query.minimal {
        pairs.push(("minimal", "true".to_string()));
    }
    pairs
}

#[async_trait]
impl ResourceApi for HttpApiClient {
    async fn get_resources(
        &self,
        team_id: &str,
        query: &ResourcesQuery,
    ) -> SyncResult<ResourcesResponse> {
        let url = format!("{}/api/teams/{}/resources", self.base_url, team_id);
        debug!(
            "Fetching {} resources and {} workspaces for team {}",
            query.resources_ids.len(),
            query.workspaces_ids.len(),
            team_id
        );
        let request = self.http.get(&url).query(&resources_query_pairs(query));
        self.send_json(request).await
    }

    async fn get_template(&self, template_id: &str) -> SyncResult<Template> {
        let url = format!("{}/api/templates/{}", self.base_url, template_id);
        let response: TemplateResponse = self.send_json(self.http.get(&url)).await?;
        Ok(response.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_repeat_ids() {
        let query = ResourcesQuery {
            resources_ids: vec!["d1".into(), "f1".into()],
            workspaces_ids: vec!["ws-1".into()],
            minimal: true,
        };
        assert_eq!(
            resources_query_pairs(&query),
            vec![
                ("resourcesIds", "d1".to_string()),
                ("resourcesIds", "f1".to_string()),
                ("workspacesIds", "ws-1".to_string()),
                ("minimal", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_without_minimal() {
        let query = ResourcesQuery {
            workspaces_ids: vec!["ws-1".into()],
            ..Default::default()
        };
        assert_eq!(
            resources_query_pairs(&query),
            vec![("workspacesIds", "ws-1".to_string())]
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpApiClient::new(
            "http://localhost:3001/",
            Arc::new(crate::api::StaticToken(None)),
            Client::new(),
        );
        assert_eq!(client.base_url, "http://localhost:3001");
    }
}
