#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use envelope_core::EnvelopeConfig;
use http_body_util::BodyExt;
use tower::ServiceExt;

use envelope_api::config::ServerConfig;
use envelope_api::router::build_app_router;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        envelope: EnvelopeConfig::default(),
    }
}

/// Build the full application router, mirroring `main.rs`.
pub fn build_test_app() -> Router {
    build_app_router(&test_config())
}

/// Collect a response into its status and parsed JSON body.
pub async fn into_json(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    into_json(app.oneshot(request).await.unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    into_json(app.oneshot(request).await.unwrap()).await
}
