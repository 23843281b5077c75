mod common;

use async_trait::async_trait;
use axum::{Router, http::StatusCode, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

use career_portal::api::handlers::health_handler;
use career_portal::domain::document::{
    Collection, Document, Fields, GuardedInsert, GuardedOutcome, Query,
};
use career_portal::domain::repositories::DocumentRepository;
use career_portal::error::AppError;
use career_portal::state::AppState;

/// Store whose every call fails, as when the database is unreachable.
struct UnreachableStore;

fn down() -> AppError {
    AppError::internal("connection refused", Value::Null)
}

#[async_trait]
impl DocumentRepository for UnreachableStore {
    async fn get(&self, _: Collection, _: &str) -> Result<Option<Document>, AppError> {
        Err(down())
    }
    async fn query(&self, _: Collection, _: Query) -> Result<Vec<Document>, AppError> {
        Err(down())
    }
    async fn count(&self, _: Collection) -> Result<u64, AppError> {
        Err(down())
    }
    async fn add(&self, _: Collection, _: Fields) -> Result<Document, AppError> {
        Err(down())
    }
    async fn update(&self, _: Collection, _: &str, _: Fields) -> Result<Option<Document>, AppError> {
        Err(down())
    }
    async fn delete(&self, _: Collection, _: &str) -> Result<bool, AppError> {
        Err(down())
    }
    async fn insert_guarded(&self, _: GuardedInsert) -> Result<GuardedOutcome, AppError> {
        Err(down())
    }
    async fn ping(&self) -> Result<(), AppError> {
        Err(down())
    }
}

#[tokio::test]
async fn test_health_ok() {
    let (server, _, _) = common::make_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["status"], "OK");
    assert_eq!(json["store"], "Connected");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["timestamp"].as_str().is_some());
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_health_store_down() {
    let state = AppState::new(Arc::new(UnreachableStore), common::test_signer());
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["status"], "ERROR");
    assert_eq!(json["store"], "Disconnected");
    assert_eq!(json["error"], json!("connection refused"));
}

#[tokio::test]
async fn test_store_errors_use_failure_envelope() {
    let state = AppState::new(Arc::new(UnreachableStore), common::test_signer());
    let server = common::serve(state, false);

    let response = server.get("/institutions").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "connection refused");
}
