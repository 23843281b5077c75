//! API route tables.
//!
//! Routes are grouped by the middleware they need so the top-level router
//! (and the integration tests) can compose them:
//!
//! - [`resource_routes`] - public resource endpoints
//! - [`session_routes`] - credential endpoints, rate limited per client IP
//! - [`protected_routes`] - admin endpoints behind bearer authentication

use crate::api::handlers::{
    apply_for_job_handler, company_applications_handler, company_jobs_handler,
    create_account_handler, create_company_handler, create_course_handler,
    create_faculty_handler, create_institution_handler, create_job_handler,
    delete_company_handler, delete_institution_handler, delete_job_handler,
    get_application_handler, get_institution_handler, get_job_handler, health_handler,
    institution_applications_handler, institutions_list_handler, list_applications_handler,
    list_companies_handler, list_courses_handler, list_faculties_handler,
    list_institutions_handler, list_jobs_handler, login_handler, profile_handler,
    publish_admissions_handler, reports_handler, setup_handler, system_stats_handler,
    update_application_status_handler, update_company_status_handler,
    update_institution_handler, update_job_application_status_handler, update_job_handler,
    update_job_status_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post},
};

/// Public resource endpoints.
///
/// # Endpoints
///
/// - `GET    /health`
/// - `GET    /institutions`, `POST /institutions`
/// - `GET    /institutions/{id}`, `PUT /institutions/{id}`, `DELETE /institutions/{id}`
/// - `GET    /institutions/{id}/faculties`, `POST /institutions/{id}/faculties`
/// - `POST   /institutions/{id}/publish-admissions`
/// - `GET    /faculties/{id}/courses`, `POST /faculties/{id}/courses`
/// - `GET    /institutions-list`
/// - `GET    /companies`, `POST /companies`, `DELETE /companies/{id}`
/// - `PATCH  /companies/{id}/status`
/// - `GET    /companies/{id}/jobs`, `GET /companies/{id}/applications`
/// - `GET    /admin/stats`, `GET /admin/reports`
/// - `GET    /applications`, `GET /applications/{id}`
/// - `GET    /applications/institute/{id}`, `GET /applications/institution/{id}`
/// - `PATCH  /applications/{id}/status`
/// - `GET    /jobs`, `POST /jobs`
/// - `GET    /jobs/{id}`, `PUT /jobs/{id}`, `DELETE /jobs/{id}`
/// - `PATCH  /jobs/{id}/status`, `POST /jobs/{id}/apply`
/// - `PATCH  /job-applications/{id}/status`
pub fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        // Institutions
        .route(
            "/institutions",
            get(list_institutions_handler).post(create_institution_handler),
        )
        .route(
            "/institutions/{id}",
            get(get_institution_handler)
                .put(update_institution_handler)
                .delete(delete_institution_handler),
        )
        .route(
            "/institutions/{id}/faculties",
            get(list_faculties_handler).post(create_faculty_handler),
        )
        .route(
            "/institutions/{id}/publish-admissions",
            post(publish_admissions_handler),
        )
        .route(
            "/faculties/{id}/courses",
            get(list_courses_handler).post(create_course_handler),
        )
        .route("/institutions-list", get(institutions_list_handler))
        // Companies
        .route(
            "/companies",
            get(list_companies_handler).post(create_company_handler),
        )
        .route("/companies/{id}", delete(delete_company_handler))
        .route("/companies/{id}/status", patch(update_company_status_handler))
        .route("/companies/{id}/jobs", get(company_jobs_handler))
        .route(
            "/companies/{id}/applications",
            get(company_applications_handler),
        )
        // Dashboard
        .route("/admin/stats", get(system_stats_handler))
        .route("/admin/reports", get(reports_handler))
        // Admissions applications
        .route("/applications", get(list_applications_handler))
        .route(
            "/applications/institute/{id}",
            get(institution_applications_handler),
        )
        .route(
            "/applications/institution/{id}",
            get(institution_applications_handler),
        )
        .route("/applications/{id}", get(get_application_handler))
        .route(
            "/applications/{id}/status",
            patch(update_application_status_handler),
        )
        // Jobs
        .route("/jobs", get(list_jobs_handler).post(create_job_handler))
        .route(
            "/jobs/{id}",
            get(get_job_handler)
                .put(update_job_handler)
                .delete(delete_job_handler),
        )
        .route("/jobs/{id}/status", patch(update_job_status_handler))
        .route("/jobs/{id}/apply", post(apply_for_job_handler))
        .route(
            "/job-applications/{id}/status",
            patch(update_job_application_status_handler),
        )
}

/// `POST /admin/login` and `POST /admin/setup`.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(login_handler))
        .route("/admin/setup", post(setup_handler))
}

/// Admin endpoints. Callers must wrap these in
/// [`crate::api::middleware::auth::layer`].
///
/// - `GET  /admin/profile`
/// - `POST /admin/accounts`
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/profile", get(profile_handler))
        .route("/admin/accounts", post(create_account_handler))
}
