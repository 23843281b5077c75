//! Handlers for admin login, bootstrap and account management.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::auth::{AdminAccountRequest, AdminProfile, LoginRequest, LoginResponse};
use crate::api::extract::JsonBody;
use crate::application::services::{NewAdmin, SetupOutcome};
use crate::domain::entities::Admin;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for a session token.
///
/// # Endpoint
///
/// `POST /admin/login`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Login successful",
///   "token": "eyJhZG1pbklkIjoi....3f9a",
///   "admin": { "id": "...", "email": "...", "name": "...", "role": "super_admin" }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if email or password is missing.
/// Returns 401 "Invalid email or password".
pub async fn login_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (token, admin) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        admin: AdminProfile::summary(&admin),
    }))
}

/// Creates the first super admin. Once any admin exists this does nothing.
///
/// # Endpoint
///
/// `POST /admin/setup`
pub async fn setup_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<AdminAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AdminProfile>>), AppError> {
    payload.validate()?;

    let outcome = state
        .auth_service
        .setup(&payload.email, &payload.password, &payload.name)
        .await?;

    Ok(match outcome {
        SetupOutcome::Created(admin) => (
            StatusCode::CREATED,
            Json(ApiResponse::with_message(
                "Admin account created successfully",
                AdminProfile::from(&admin),
            )),
        ),
        SetupOutcome::AlreadyExists => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                message: Some("Admin account already exists".to_string()),
                data: None,
            }),
        ),
    })
}

/// `GET /admin/profile`: the authenticated admin.
pub async fn profile_handler(
    Extension(admin): Extension<Admin>,
) -> Json<ApiResponse<AdminProfile>> {
    Json(ApiResponse::data(AdminProfile::from(&admin)))
}

/// Creates another admin account.
///
/// # Endpoint
///
/// `POST /admin/accounts`
///
/// # Errors
///
/// Returns 403 unless the caller is a super admin.
/// Returns 400 if the email is already registered.
pub async fn create_account_handler(
    State(state): State<AppState>,
    Extension(creator): Extension<Admin>,
    JsonBody(payload): JsonBody<AdminAccountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AdminProfile>>), AppError> {
    payload.validate()?;

    let admin = state
        .auth_service
        .create_account(
            &creator,
            NewAdmin {
                email: payload.email,
                password: payload.password,
                name: payload.name,
                role: payload.role,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Admin account created successfully",
            AdminProfile::from(&admin),
        )),
    ))
}
