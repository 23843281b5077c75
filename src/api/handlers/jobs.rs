//! Handlers for job postings and job applications.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::job::{
    ApplyRequest, CreateJobRequest, JobListQuery, UpdateJobRequest, parse_job_status,
};
use crate::api::dto::{ApiResponse, StatusUpdateRequest};
use crate::api::extract::{JsonBody, QueryParams};
use crate::domain::entities::{Job, JobApplication};
use crate::error::AppError;
use crate::state::AppState;

/// Lists jobs newest first.
///
/// # Endpoint
///
/// `GET /jobs?companyId=...&status=active`
///
/// # Errors
///
/// Returns 400 if `status` is not active, closed or draft.
pub async fn list_jobs_handler(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<JobListQuery>,
) -> Result<Json<ApiResponse<Vec<Job>>>, AppError> {
    let status = parse_job_status(query.status.as_deref())?;
    let jobs = state
        .job_service
        .list(query.company_id.as_deref(), status)
        .await?;
    Ok(Json(ApiResponse::data(jobs)))
}

/// Posts a job.
///
/// # Endpoint
///
/// `POST /jobs`
///
/// Missing optional fields get their defaults: location "Remote", category
/// "Other", salary range "Negotiable", job type "Full-time" and a deadline
/// thirty days out.
///
/// # Errors
///
/// Returns 400 "Title, description, and companyId are required".
pub async fn create_job_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateJobRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Job>>), AppError> {
    payload.validate()?;

    let job = state.job_service.create(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Job posted successfully", job)),
    ))
}

/// `GET /jobs/{id}`
pub async fn get_job_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    let job = state.job_service.get(&id).await?;
    Ok(Json(ApiResponse::data(job)))
}

/// `PUT /jobs/{id}`
pub async fn update_job_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateJobRequest>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    payload.validate()?;

    let job = state.job_service.update(&id, payload.into()).await?;
    Ok(Json(ApiResponse::with_message("Job updated successfully", job)))
}

/// `PATCH /jobs/{id}/status`
///
/// # Errors
///
/// Returns 400 "Invalid status. Must be: active, closed, or draft".
/// Returns 404 if the job does not exist.
pub async fn update_job_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<Job>>, AppError> {
    let job = state.job_service.update_status(&id, &payload.status).await?;

    Ok(Json(ApiResponse::with_message(
        format!("Job status updated to {}", job.status),
        job,
    )))
}

/// `DELETE /jobs/{id}`
pub async fn delete_job_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.job_service.delete(&id).await?;
    Ok(Json(ApiResponse::message("Job deleted successfully")))
}

/// Submits a student's application for a job.
///
/// # Endpoint
///
/// `POST /jobs/{id}/apply`
///
/// The application is stored and the job's `applications` counter bumped in
/// one step.
///
/// # Errors
///
/// Returns 400 if `studentId` is missing or the student already applied.
/// Returns 404 if the job does not exist.
pub async fn apply_for_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    JsonBody(payload): JsonBody<ApplyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<JobApplication>>), AppError> {
    payload.validate()?;

    let application = state.job_service.apply(&job_id, payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Application submitted successfully",
            application,
        )),
    ))
}

/// `PATCH /job-applications/{id}/status`
///
/// # Errors
///
/// Returns 400 unless the status is pending, reviewed, accepted, rejected or
/// interview.
/// Returns 404 if the job application does not exist.
pub async fn update_job_application_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<JobApplication>>, AppError> {
    let application = state
        .job_service
        .update_application_status(&id, &payload.status)
        .await?;

    Ok(Json(ApiResponse::with_message(
        format!("Application status updated to {}", application.status),
        application,
    )))
}
