//! Handlers for institution endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::institution::{
    CreateInstitutionRequest, PublishAdmissionsRequest, UpdateInstitutionRequest,
};
use crate::api::extract::JsonBody;
use crate::domain::entities::{Admission, Institution};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all institutions, newest first.
///
/// # Endpoint
///
/// `GET /institutions`
pub async fn list_institutions_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Institution>>>, AppError> {
    let institutions = state.institution_service.list().await?;
    Ok(Json(ApiResponse::data(institutions)))
}

/// `GET /institutions/{id}`
pub async fn get_institution_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Institution>>, AppError> {
    let institution = state.institution_service.get(&id).await?;
    Ok(Json(ApiResponse::data(institution)))
}

/// Creates an institution.
///
/// # Endpoint
///
/// `POST /institutions`
///
/// # Errors
///
/// Returns 400 if `name` or `code` is missing, or another institution
/// already uses the code (compared case-insensitively).
pub async fn create_institution_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateInstitutionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Institution>>), AppError> {
    payload.validate()?;

    let institution = state.institution_service.create(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Institution added successfully",
            institution,
        )),
    ))
}

/// Partially updates an institution.
///
/// # Endpoint
///
/// `PUT /institutions/{id}`
///
/// # Errors
///
/// Returns 400 if the new code collides with another institution.
/// Returns 404 if the institution does not exist.
pub async fn update_institution_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateInstitutionRequest>,
) -> Result<Json<ApiResponse<Institution>>, AppError> {
    payload.validate()?;

    let institution = state.institution_service.update(&id, payload.into()).await?;

    Ok(Json(ApiResponse::with_message(
        "Institution updated successfully",
        institution,
    )))
}

/// Deletes an institution. Its faculties, courses and admissions stay.
///
/// # Endpoint
///
/// `DELETE /institutions/{id}`
pub async fn delete_institution_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.institution_service.delete(&id).await?;
    Ok(Json(ApiResponse::message("Institution deleted successfully")))
}

/// Publishes an admission round for the institution.
///
/// # Endpoint
///
/// `POST /institutions/{id}/publish-admissions`
///
/// The body is optional; `academicYear` defaults to the current year and
/// `deadline` to thirty days from now.
///
/// # Errors
///
/// Returns 400 for a malformed body.
/// Returns 404 if the institution does not exist.
pub async fn publish_admissions_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<Admission>>), AppError> {
    let payload: PublishAdmissionsRequest = if body.iter().all(u8::is_ascii_whitespace) {
        PublishAdmissionsRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request(format!("Invalid request body: {e}"), Value::Null))?
    };

    let admission = state
        .institution_service
        .publish_admissions(&id, payload.academic_year, payload.deadline)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Admissions published successfully",
            admission,
        )),
    ))
}
