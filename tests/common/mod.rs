#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;

use career_portal::domain::document::{Collection, Fields};
use career_portal::domain::repositories::DocumentRepository;
use career_portal::infrastructure::persistence::MemoryDocumentRepository;
use career_portal::routes::app_router;
use career_portal::state::AppState;
use career_portal::utils::session_token::TokenSigner;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_signer() -> TokenSigner {
    TokenSigner::new(TEST_SECRET.as_bytes(), chrono::Duration::hours(1))
}

/// State over a fresh in-memory store. The store handle is returned for
/// seeding documents that have no create endpoint.
pub fn create_test_state() -> (AppState, Arc<MemoryDocumentRepository>) {
    let repository = Arc::new(MemoryDocumentRepository::new());
    let state = AppState::new(repository.clone(), test_signer());
    (state, repository)
}

/// Serves the production router over a real socket so the rate limiter sees
/// a peer address.
pub fn serve(state: AppState, behind_proxy: bool) -> TestServer {
    let app = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(
        app_router(state, behind_proxy),
    );

    TestServer::builder().http_transport().build(app).unwrap()
}

pub fn make_server() -> (TestServer, AppState, Arc<MemoryDocumentRepository>) {
    let (state, repository) = create_test_state();
    let server = serve(state.clone(), false);
    (server, state, repository)
}

pub fn fields(value: Value) -> Fields {
    value.as_object().unwrap().clone()
}

pub async fn seed(repository: &MemoryDocumentRepository, collection: Collection, value: Value) -> String {
    repository.add(collection, fields(value)).await.unwrap().id
}

pub async fn seed_application(
    repository: &MemoryDocumentRepository,
    student_id: &str,
    institution_id: &str,
    status: &str,
) -> String {
    seed(
        repository,
        Collection::Applications,
        json!({
            "studentId": student_id,
            "institutionId": institution_id,
            "courseId": "course-1",
            "status": status,
        }),
    )
    .await
}

pub async fn create_institution(server: &TestServer, name: &str, code: &str) -> Value {
    let response = server
        .post("/institutions")
        .json(&json!({"name": name, "code": code, "type": "university", "location": "Maseru"}))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

pub async fn create_job(server: &TestServer, company_id: &str, title: &str) -> Value {
    let response = server
        .post("/jobs")
        .json(&json!({
            "title": title,
            "description": "Build and run services",
            "companyId": company_id,
            "companyName": "Acme"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

/// Runs setup and logs in, returning a bearer token for the super admin.
pub async fn super_admin_token(server: &TestServer) -> String {
    server
        .post("/admin/setup")
        .json(&json!({"email": "root@example.com", "password": "correct-horse", "name": "Root"}))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    login(server, "root@example.com", "correct-horse").await
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/admin/login")
        .json(&json!({"email": email, "password": password}))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"].as_str().unwrap().to_string()
}
