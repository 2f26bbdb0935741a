#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use vocab_trainer::config::Config;
use vocab_trainer::db::Database;
use vocab_trainer::state::AppState;

/// Router over a fresh database in its own temp dir. Keep the `TempDir` alive for the test.
pub async fn create_test_app() -> (Router, TempDir) {
    let (state, dir) = create_test_state().await;
    (vocab_trainer::create_app(state), dir)
}

pub async fn create_test_state() -> (AppState, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let mut config = Config::with_database(dir.path().join("vocab.db"));
    config.seed_default_milestones = false;
    let state = vocab_trainer::init_state(config)
        .await
        .expect("failed to init test state");
    (state, dir)
}

pub async fn open_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db = Database::open(dir.path().join("vocab.db"))
        .await
        .expect("failed to open test database");
    (db, dir)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}
