/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An app instance over in-memory storage (no external services needed)
/// - Request builders with optional bearer tokens
/// - Response parsing helpers
/// - A register-then-login flow returning a usable token

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tasklane_api::app::{build_router, AppState};
use tasklane_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use tasklane_shared::repo::MemoryRepository;
use tower::ServiceExt;

/// Test context containing the router and its state
pub struct TestContext {
    pub app: axum::Router,
    pub state: AppState,
}

impl TestContext {
    /// Creates a fresh app over empty in-memory storage
    pub fn new() -> Self {
        let repo = Arc::new(MemoryRepository::new());
        let state =
            AppState::new(repo.clone(), repo, test_config()).expect("Should build app state");
        let app = build_router(state.clone());
        Self { app, state }
    }
}

/// Configuration for tests; storage is in-memory so the database section is
/// never dialed.
fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/unused".to_string(),
            max_connections: 5,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret-key-32-bytes!".to_string(),
            expiration_hours: 24,
        },
        seed_demo_data: false,
        log_json: false,
    }
}

/// Builds a JSON request, optionally with a bearer token
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Should build request")
}

/// Builds a bodyless request, optionally with a bearer token
pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("Should build request")
}

/// Sends a request and parses the response body as JSON
pub async fn send(ctx: &TestContext, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = ctx
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Should route request");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).expect("Response should be JSON")
    };
    (status, json)
}

/// Sends a request and returns the raw response body as text
pub async fn send_text(ctx: &TestContext, request: Request<Body>) -> (StatusCode, String) {
    let response = ctx
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Should route request");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    (status, String::from_utf8_lossy(&body).into_owned())
}

/// Registers a user and logs in, returning the user id and a bearer token
pub async fn register_and_login(ctx: &TestContext, username: &str, email: &str) -> (i64, String) {
    let (status, body) = send(
        ctx,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            serde_json::json!({
                "username": username,
                "email": email,
                "password": "integration-pw",
                "full_name": "Test User"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let user_id = body["data"]["id"].as_i64().expect("Should carry user id");

    let (status, body) = send(
        ctx,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            serde_json::json!({
                "email": email,
                "password": "integration-pw"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    let token = body["data"]["token"]
        .as_str()
        .expect("Should carry token")
        .to_string();

    (user_id, token)
}
