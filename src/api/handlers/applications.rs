//! Handlers for admissions applications.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::{ApiResponse, StatusUpdateRequest};
use crate::api::extract::JsonBody;
use crate::domain::entities::Application;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /applications`
pub async fn list_applications_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Application>>>, AppError> {
    let applications = state.application_service.list().await?;
    Ok(Json(ApiResponse::data(applications)))
}

/// Applications submitted to one institution.
///
/// Served under both `GET /applications/institute/{id}` and
/// `GET /applications/institution/{id}`.
pub async fn institution_applications_handler(
    State(state): State<AppState>,
    Path(institution_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Application>>>, AppError> {
    let applications = state
        .application_service
        .list_for_institution(&institution_id)
        .await?;
    Ok(Json(ApiResponse::data(applications)))
}

/// `GET /applications/{id}`
pub async fn get_application_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Application>>, AppError> {
    let application = state.application_service.get(&id).await?;
    Ok(Json(ApiResponse::data(application)))
}

/// Sets an application to pending, approved or rejected.
///
/// # Endpoint
///
/// `PATCH /applications/{id}/status`
///
/// # Errors
///
/// Returns 400 for an unknown status.
/// Returns 404 "Application not found" if the application does not exist.
pub async fn update_application_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<Application>>, AppError> {
    let application = state
        .application_service
        .update_status(&id, &payload.status)
        .await?;

    Ok(Json(ApiResponse::with_message(
        format!("Application status updated to {}", payload.status),
        application,
    )))
}
