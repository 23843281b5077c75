//! Admin dashboard statistics and reports.

use axum::{Json, extract::State};

use crate::api::dto::ApiResponse;
use crate::application::services::{ApplicationReport, SystemStats};
use crate::error::AppError;
use crate::state::AppState;

/// Platform totals with application and company status breakdowns.
///
/// # Endpoint
///
/// `GET /admin/stats`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "totalUsers": 12,
///     "totalInstitutions": 3,
///     "totalCompanies": 4,
///     "totalApplications": 20,
///     "pendingApplications": 8,
///     "approvedApplications": 10,
///     "rejectedApplications": 2,
///     "pendingCompanies": 1,
///     "activeCompanies": 2,
///     "suspendedCompanies": 1
///   }
/// }
/// ```
pub async fn system_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SystemStats>>, AppError> {
    let stats = state.stats_service.system_stats().await?;
    Ok(Json(ApiResponse::data(stats)))
}

/// `GET /admin/reports`: application tallies overall and per institution.
pub async fn reports_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ApplicationReport>>, AppError> {
    let report = state.stats_service.application_report().await?;
    Ok(Json(ApiResponse::data(report)))
}

/// `GET /institutions-list`: ids of institutions that received applications.
pub async fn institutions_list_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let ids = state.stats_service.institutions_with_applications().await?;
    Ok(Json(ApiResponse::data(ids)))
}
