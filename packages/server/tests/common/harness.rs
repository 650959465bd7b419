//! Test harness: builds the full application router over the
//! in-memory store and drives it request by request.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use server_core::domains::auth::JwtService;
use server_core::server::app::build_app;
use server_core::store::Store;

use super::store::MemStore;

pub const TEST_SECRET: &str = "test_secret_key";
pub const TEST_ISSUER: &str = "test_issuer";

/// JWT service configured identically to the one inside the test app.
pub fn jwt_service() -> JwtService {
    JwtService::new(TEST_SECRET, TEST_ISSUER.to_string(), Some(3600))
}

/// Build the application router over an in-memory store.
pub fn test_app(store: Arc<MemStore>) -> Router {
    let store: Arc<dyn Store> = store;
    build_app(store, Arc::new(jwt_service()))
}

/// Send one request through the router and decode the JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        // Mirror the real server, which serves with
        // `into_make_service_with_connect_info`, so the rate limiter's
        // peer-IP key extractor has a socket address to read.
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 0))))
        // The GraphQL rate limiter keys on the client IP
        .header("x-forwarded-for", "127.0.0.1");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// POST a GraphQL query; returns status and the response body.
pub async fn graphql(app: &Router, query: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/graphql",
        None,
        Some(serde_json::json!({ "query": query })),
    )
    .await
}
