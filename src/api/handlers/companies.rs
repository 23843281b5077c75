//! Handlers for company endpoints, including a company's jobs and the
//! applications it received.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::company::{CompanyListQuery, CreateCompanyRequest};
use crate::api::dto::job::{CompanyApplicationsQuery, CompanyJobsQuery, parse_job_status};
use crate::api::dto::{ApiResponse, StatusUpdateRequest};
use crate::api::extract::{JsonBody, QueryParams};
use crate::domain::entities::{Company, CompanyStatus, Job, JobApplication};
use crate::error::AppError;
use crate::state::AppState;

/// Lists companies, optionally only those with a given moderation status.
///
/// # Endpoint
///
/// `GET /companies?status=pending`
///
/// # Errors
///
/// Returns 400 for an unknown status.
pub async fn list_companies_handler(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CompanyListQuery>,
) -> Result<Json<ApiResponse<Vec<Company>>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            CompanyStatus::parse(s).ok_or_else(|| {
                AppError::bad_request(
                    "Invalid status. Must be: pending, approved, or suspended",
                    json!({"status": s}),
                )
            })
        })
        .transpose()?;

    let companies = state.company_service.list(status).await?;
    Ok(Json(ApiResponse::data(companies)))
}

/// `POST /companies`
pub async fn create_company_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Company>>), AppError> {
    payload.validate()?;

    let company = state.company_service.create(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Company registered successfully", company)),
    ))
}

/// `DELETE /companies/{id}`
pub async fn delete_company_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.company_service.delete(&id).await?;
    Ok(Json(ApiResponse::message("Company deleted successfully")))
}

/// Moves a company between pending, approved and suspended.
///
/// # Endpoint
///
/// `PATCH /companies/{id}/status`
///
/// # Errors
///
/// Returns 400 for an unknown status.
/// Returns 404 if the company does not exist.
pub async fn update_company_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<Company>>, AppError> {
    let company = state
        .company_service
        .update_status(&id, &payload.status)
        .await?;

    Ok(Json(ApiResponse::with_message(
        format!("Company status updated to {}", company.status),
        company,
    )))
}

/// `GET /companies/{id}/jobs?status=active`
pub async fn company_jobs_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    QueryParams(query): QueryParams<CompanyJobsQuery>,
) -> Result<Json<ApiResponse<Vec<Job>>>, AppError> {
    let status = parse_job_status(query.status.as_deref())?;
    let jobs = state.job_service.list(Some(company_id.as_str()), status).await?;
    Ok(Json(ApiResponse::data(jobs)))
}

/// `GET /companies/{id}/applications?status=pending&jobId=...`
pub async fn company_applications_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    QueryParams(query): QueryParams<CompanyApplicationsQuery>,
) -> Result<Json<ApiResponse<Vec<JobApplication>>>, AppError> {
    let status = query.status()?;
    let applications = state
        .job_service
        .company_applications(&company_id, status, query.job_id.as_deref())
        .await?;
    Ok(Json(ApiResponse::data(applications)))
}
