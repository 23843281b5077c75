//! Handlers for faculties and courses.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::faculty::{CreateCourseRequest, CreateFacultyRequest};
use crate::api::extract::JsonBody;
use crate::domain::entities::{Course, Faculty};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /institutions/{id}/faculties`
pub async fn list_faculties_handler(
    State(state): State<AppState>,
    Path(institution_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Faculty>>>, AppError> {
    let faculties = state.faculty_service.list_faculties(&institution_id).await?;
    Ok(Json(ApiResponse::data(faculties)))
}

/// `POST /institutions/{id}/faculties`
///
/// # Errors
///
/// Returns 400 if `name` or `code` is missing.
/// Returns 404 if the institution does not exist.
pub async fn create_faculty_handler(
    State(state): State<AppState>,
    Path(institution_id): Path<String>,
    JsonBody(payload): JsonBody<CreateFacultyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Faculty>>), AppError> {
    payload.validate()?;

    let faculty = state
        .faculty_service
        .create_faculty(payload.into_faculty(institution_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Faculty added successfully", faculty)),
    ))
}

/// `GET /faculties/{id}/courses`
pub async fn list_courses_handler(
    State(state): State<AppState>,
    Path(faculty_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Course>>>, AppError> {
    let courses = state.faculty_service.list_courses(&faculty_id).await?;
    Ok(Json(ApiResponse::data(courses)))
}

/// `POST /faculties/{id}/courses`
///
/// # Errors
///
/// Returns 400 if `name` or `code` is missing.
/// Returns 404 if the faculty does not exist.
pub async fn create_course_handler(
    State(state): State<AppState>,
    Path(faculty_id): Path<String>,
    JsonBody(payload): JsonBody<CreateCourseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Course>>), AppError> {
    payload.validate()?;

    let course = state
        .faculty_service
        .create_course(payload.into_course(faculty_id))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Course added successfully", course)),
    ))
}
