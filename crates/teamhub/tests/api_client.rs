//! HTTP client and SSE transport against a mock server

use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use teamhub::api::{HttpApiClient, ResourceApi, ResourcesQuery, StaticToken};
use teamhub::stream::{ConnectRequest, EventTransport, SseTransport, TransportEvent};
use teamhub::SyncError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, token: Option<&str>) -> HttpApiClient {
    HttpApiClient::new(
        server.uri(),
        Arc::new(StaticToken(token.map(str::to_string))),
        reqwest::Client::new(),
    )
}

#[tokio::test]
async fn test_get_resources_sends_ids_and_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teams/team-1/resources"))
        .and(query_param("resourcesIds", "d1"))
        .and(query_param("resourcesIds", "f1"))
        .and(query_param("workspacesIds", "ws-1"))
        .and(query_param("minimal", "true"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [{
                "id": "d1",
                "workspaceId": "ws-1",
                "title": "Roadmap",
                "status": "in_progress",
                "createdAt": "2024-05-01T10:00:00Z",
                "updatedAt": "2024-05-02T10:00:00Z"
            }],
            "folders": [{ "id": "f1", "workspaceId": "ws-1", "name": "Plans" }],
            "workspaces": [{ "id": "ws-1", "name": "Product" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = ResourcesQuery {
        resources_ids: vec!["d1".into(), "f1".into()],
        workspaces_ids: vec!["ws-1".into()],
        minimal: true,
    };
    let resources = client(&server, Some("secret"))
        .get_resources("team-1", &query)
        .await
        .unwrap();

    assert_eq!(resources.docs.len(), 1);
    assert_eq!(resources.docs[0].title.as_deref(), Some("Roadmap"));
    assert_eq!(resources.folders[0].name, "Plans");
    assert_eq!(resources.workspaces[0].id, "ws-1");
}

#[tokio::test]
async fn test_get_resources_tolerates_missing_lists() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teams/team-1/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "docs": [] })))
        .mount(&server)
        .await;

    let query = ResourcesQuery {
        workspaces_ids: vec!["ws-1".into()],
        ..Default::default()
    };
    let resources = client(&server, None)
        .get_resources("team-1", &query)
        .await
        .unwrap();
    assert!(resources.folders.is_empty());
    assert!(resources.workspaces.is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teams/team-1/resources"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server, None)
        .get_resources("team-1", &ResourcesQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SyncError::Status { status: 500, .. }));
    assert!(err.is_network());
}

#[tokio::test]
async fn test_get_template_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/templates/tpl-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "template": { "id": "tpl-1", "title": "Meeting notes", "icon": "memo" }
        })))
        .mount(&server)
        .await;

    let template = client(&server, None).get_template("tpl-1").await.unwrap();
    assert_eq!(template.id, "tpl-1");
    assert_eq!(template.title, "Meeting notes");
    assert_eq!(template.extra.get("icon"), Some(&json!("memo")));
}

#[tokio::test]
async fn test_get_template_not_found() {
    let server = MockServer::start().await;

    let err = client(&server, None).get_template("nope").await.unwrap_err();
    assert!(matches!(err, SyncError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_sse_transport_yields_open_then_messages() {
    let server = MockServer::start().await;

    let body = concat!(
        ": keep-alive\n\n",
        "data: {\"id\":\"ev-1\",\"type\":\"tagCreate\"}\n\n",
        "event: ping\ndata: ignored\n\n",
        "event: message\ndata: {\"id\":\"ev-2\",\"type\":\"tagRemoval\"}\n\n",
    );
    Mock::given(method("GET"))
        .and(path("/events/team-1"))
        .and(header("accept", "text/event-stream"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let transport = SseTransport::new(reqwest::Client::new());
    let request = ConnectRequest {
        url: format!("{}/events/team-1", server.uri()),
        bearer_token: Some("secret".into()),
    };
    let events: Vec<TransportEvent> = transport.connect(&request).await.unwrap().collect().await;

    assert_eq!(
        events,
        vec![
            TransportEvent::Open,
            TransportEvent::Message(r#"{"id":"ev-1","type":"tagCreate"}"#.into()),
            TransportEvent::Message(r#"{"id":"ev-2","type":"tagRemoval"}"#.into()),
        ]
    );
}

#[tokio::test]
async fn test_sse_transport_rejects_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events/team-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let transport = SseTransport::new(reqwest::Client::new());
    let request = ConnectRequest {
        url: format!("{}/events/team-1", server.uri()),
        bearer_token: None,
    };
    let result = transport.connect(&request).await;
    assert!(matches!(result, Err(SyncError::Status { status: 401, .. })));
}
