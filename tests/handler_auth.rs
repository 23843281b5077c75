mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

// ─── SETUP ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_setup_creates_super_admin_once() {
    let (server, _, _) = common::make_server();

    let response = server
        .post("/admin/setup")
        .json(&json!({"email": "Root@Example.com", "password": "correct-horse", "name": "Root"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["message"], "Admin account created successfully");
    assert_eq!(json["data"]["email"], "root@example.com");
    assert_eq!(json["data"]["role"], "super_admin");
    assert!(json["data"].get("passwordHash").is_none());

    let response = server
        .post("/admin/setup")
        .json(&json!({"email": "other@example.com", "password": "correct-horse", "name": "Other"}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Admin account already exists"
    );
}

#[tokio::test]
async fn test_setup_validates_body() {
    let (server, _, _) = common::make_server();

    server
        .post("/admin/setup")
        .json(&json!({"email": "not-an-email", "password": "short", "name": ""}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ─── LOGIN ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, _, _) = common::make_server();
    common::super_admin_token(&server).await;

    let response = server
        .post("/admin/login")
        .json(&json!({"email": "root@example.com", "password": "correct-horse"}))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Login successful");
    assert!(json["token"].as_str().unwrap().contains('.'));
    assert_eq!(json["admin"]["role"], "super_admin");
    assert!(json["admin"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _, _) = common::make_server();
    common::super_admin_token(&server).await;

    let response = server
        .post("/admin/login")
        .json(&json!({"email": "root@example.com", "password": "wrong-password"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let (server, _, _) = common::make_server();

    let response = server
        .post("/admin/login")
        .json(&json!({"email": "root@example.com"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Email and password are required"
    );
}

// ─── PROFILE ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_profile_requires_token() {
    let (server, _, _) = common::make_server();

    let response = server.get("/admin/profile").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Access token required");
}

#[tokio::test]
async fn test_profile_rejects_forged_token() {
    let (server, _, _) = common::make_server();

    let response = server
        .get("/admin/profile")
        .authorization_bearer("eyJhZG1pbklkIjoieCJ9.deadbeef")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Invalid token");
}

#[tokio::test]
async fn test_profile_with_token() {
    let (server, _, _) = common::make_server();
    let token = common::super_admin_token(&server).await;

    let response = server
        .get("/admin/profile")
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["data"]["email"], "root@example.com");
    assert_eq!(json["data"]["name"], "Root");
    assert!(json["data"]["createdAt"].as_str().is_some());
}

#[tokio::test]
async fn test_deactivated_admin_loses_access() {
    let (server, state, _) = common::make_server();
    let token = common::super_admin_token(&server).await;

    let admin = state
        .auth_service
        .deactivate("root@example.com")
        .await
        .unwrap();
    assert!(!admin.is_active);
    assert!(admin.updated_at.is_some());

    let response = server
        .get("/admin/profile")
        .authorization_bearer(&token)
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["error"], "Admin account deactivated");
}

// ─── ACCOUNTS ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_super_admin_creates_account() {
    let (server, _, _) = common::make_server();
    let token = common::super_admin_token(&server).await;

    let response = server
        .post("/admin/accounts")
        .authorization_bearer(&token)
        .json(&json!({"email": "ops@example.com", "password": "ops-password", "name": "Ops"}))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["data"]["role"], "admin");

    let response = server
        .post("/admin/accounts")
        .authorization_bearer(&token)
        .json(&json!({"email": "OPS@example.com", "password": "ops-password", "name": "Ops"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Admin with this email already exists"
    );
}

#[tokio::test]
async fn test_plain_admin_cannot_create_accounts() {
    let (server, _, _) = common::make_server();
    let root = common::super_admin_token(&server).await;

    server
        .post("/admin/accounts")
        .authorization_bearer(&root)
        .json(&json!({"email": "ops@example.com", "password": "ops-password", "name": "Ops"}))
        .await
        .assert_status(StatusCode::CREATED);

    let ops = common::login(&server, "ops@example.com", "ops-password").await;

    let response = server
        .post("/admin/accounts")
        .authorization_bearer(&ops)
        .json(&json!({"email": "new@example.com", "password": "new-password", "name": "New"}))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"],
        "Only super admins can create admin accounts"
    );
}
