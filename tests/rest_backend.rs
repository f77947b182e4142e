//! Integration tests for the REST adapter and transport against a stub
//! backend served over a real socket.

use agent_studio_sdk::access::DataAccess;
use agent_studio_sdk::access::rest::RestDataAccess;
use agent_studio_sdk::{Credential, Error, Transport};
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

async fn get_agent(Path(id): Path<String>) -> impl IntoResponse {
    if id == "a-1" {
        (
            StatusCode::OK,
            Json(json!({
                "project_id": "a-1",
                "name": "Support bot",
                "status": "deployed",
                "created_at": "2026-01-15T09:30:00Z"
            })),
        )
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})))
    }
}

async fn list_documents() -> Json<serde_json::Value> {
    Json(json!({ "documents": [] }))
}

async fn get_document() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"})))
}

async fn get_tiledesk_bot() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"error": "no bot"})))
}

async fn guarded(headers: HeaderMap) -> impl IntoResponse {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if authorization.is_empty() {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "no credential"})))
    } else {
        (StatusCode::OK, Json(json!({ "authorization": authorization })))
    }
}

async fn boom() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "kaboom")
}

fn stub_app() -> Router {
    Router::new()
        .route("/api/agents/{id}", get(get_agent))
        .route("/api/agents/{id}/documents", get(list_documents))
        .route("/api/agents/{id}/documents/{doc_id}", get(get_document))
        .route("/api/agents/{id}/integrations/tiledesk", get(get_tiledesk_bot))
        .route("/api/guarded", get(guarded))
        .route("/api/boom", get(boom))
}

async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, stub_app()).await.expect("serve");
    });
    format!("http://{addr}")
}

fn access_for(base_url: &str) -> RestDataAccess {
    let credential = Some(Credential::ApiKey("test-key".to_string()));
    let api = Transport::new(base_url, credential.clone()).expect("api transport");
    let bridge = Transport::new(base_url, credential).expect("bridge transport");
    RestDataAccess::new(api, bridge)
}

#[tokio::test]
async fn test_empty_list_payload_resolves_to_empty_vec() {
    let base_url = spawn_backend().await;
    let access = access_for(&base_url);

    let documents = access.list_documents("a-1").await.expect("list documents");
    assert!(documents.is_empty());
}

#[tokio::test]
async fn test_absent_single_resource_resolves_to_none() {
    let base_url = spawn_backend().await;
    let access = access_for(&base_url);

    assert!(access.get_agent("missing").await.expect("get agent").is_none());
    assert!(
        access
            .get_document("a-1", "missing")
            .await
            .expect("get document")
            .is_none()
    );
}

#[tokio::test]
async fn test_tiledesk_404_maps_to_none() {
    let base_url = spawn_backend().await;
    let access = access_for(&base_url);

    let bot = access.get_tiledesk_bot("a-1").await.expect("bot lookup");
    assert!(bot.is_none());
}

#[tokio::test]
async fn test_agent_id_normalized_from_legacy_key() {
    let base_url = spawn_backend().await;
    let access = access_for(&base_url);

    let agent = access
        .get_agent("a-1")
        .await
        .expect("get agent")
        .expect("agent exists");
    assert_eq!(agent.id, "a-1");
    assert_eq!(agent.status.as_deref(), Some("deployed"));
    assert!(agent.created_at.is_some());
}

#[derive(Debug, serde::Deserialize)]
struct Echo {
    authorization: String,
}

#[tokio::test]
async fn test_api_key_credential_header() {
    let base_url = spawn_backend().await;
    let transport = Transport::new(
        &base_url,
        Some(Credential::ApiKey("ak_secret".to_string())),
    )
    .expect("transport");

    let echo: Echo = transport.get("/api/guarded").await.expect("guarded call");
    assert_eq!(echo.authorization, "ApiKey ak_secret");
}

#[tokio::test]
async fn test_bearer_credential_header() {
    let base_url = spawn_backend().await;
    let transport = Transport::new(
        &base_url,
        Some(Credential::Bearer("ak_secret".to_string())),
    )
    .expect("transport");

    let echo: Echo = transport.get("/api/guarded").await.expect("guarded call");
    assert_eq!(echo.authorization, "Bearer ak_secret");
}

#[tokio::test]
async fn test_missing_credential_still_sends_request() {
    let base_url = spawn_backend().await;
    let transport = Transport::new(&base_url, None).expect("transport");

    // The request goes out unauthenticated; the backend's rejection comes
    // back as a classified API error, not a client-side failure.
    let err = transport
        .get::<Echo>("/api/guarded")
        .await
        .expect_err("expected 401");
    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_non_success_maps_to_api_error() {
    let base_url = spawn_backend().await;
    let transport = Transport::new(&base_url, None).expect("transport");

    let err = transport
        .get::<serde_json::Value>("/api/boom")
        .await
        .expect_err("expected 500");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "kaboom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
