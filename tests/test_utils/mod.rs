//! Test utilities for integration tests
#![allow(dead_code)]
use std::fs;
use std::sync::{Arc, RwLock};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

use push_worker::api::{AppState, app};
use push_worker::core::WorkerConfig;
use push_worker::emulator::Emulator;

pub const NOW: i64 = 1_700_000_000_000;

pub fn test_config() -> WorkerConfig {
    WorkerConfig {
        version: "v1".to_string(),
        cache_prefix: "push-notifications-".to_string(),
        precache_urls: vec![
            "/".to_string(),
            "/index.html".to_string(),
            "/icon.png".to_string(),
        ],
        vibration_supported: true,
        origin: None,
        ..WorkerConfig::default()
    }
}

pub fn test_emulator() -> Emulator {
    Emulator::new(test_config()).with_clock(|| NOW)
}

/// Creates a test application router around a fresh emulator.
pub fn test_app() -> Router {
    test_app_with(test_emulator())
}

pub fn test_app_with(emulator: Emulator) -> Router {
    app(Arc::new(RwLock::new(AppState::new(emulator))))
}

/// Creates a test application serving assets from a temporary directory
/// with an index page. The directory is removed when the `TempDir` drops.
pub fn assets_app() -> (Router, TempDir) {
    let dir = TempDir::new().expect("Failed to create assets directory");
    fs::write(dir.path().join("index.html"), "<html>push</html>")
        .expect("Failed to write index.html");

    let config = WorkerConfig {
        assets_path: dir.path().display().to_string(),
        ..test_config()
    };
    (test_app_with(Emulator::new(config).with_clock(|| NOW)), dir)
}

/// Creates a test application whose worker is already installed and
/// active.
pub async fn active_app() -> Router {
    let app = test_app();
    let (status, _) = post_json(&app, "/api/events", serde_json::json!({"type": "install"})).await;
    assert_eq!(status, StatusCode::OK);
    app
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = body_to_string(response.into_body()).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = body_to_string(response.into_body()).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}
