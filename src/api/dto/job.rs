//! DTOs for job postings and job applications.

use serde::Deserialize;
use serde_with::{DefaultOnNull, NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::api::dto::validation::non_blank;
use crate::domain::entities::{
    DEFAULT_DEADLINE_DAYS, Job, JobApplicationStatus, JobPatch, JobStatus, NewJobApplication,
};
use crate::error::AppError;
use crate::utils::timestamp::Timestamp;

/// Parses an optional job status filter.
pub fn parse_job_status(status: Option<&str>) -> Result<Option<JobStatus>, AppError> {
    status
        .map(|s| {
            JobStatus::parse(s).ok_or_else(|| {
                AppError::bad_request(
                    "Invalid status. Must be: active, closed, or draft",
                    serde_json::json!({"status": s}),
                )
            })
        })
        .transpose()
}

/// Query parameters for `GET /jobs`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub company_id: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<String>,
}

/// Query parameters for `GET /companies/{id}/jobs`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct CompanyJobsQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<String>,
}

/// Query parameters for `GET /companies/{id}/applications`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyApplicationsQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub job_id: Option<String>,
}

impl CompanyApplicationsQuery {
    pub fn status(&self) -> Result<Option<JobApplicationStatus>, AppError> {
        self.status
            .as_deref()
            .map(|s| {
                JobApplicationStatus::parse(s).ok_or_else(|| {
                    AppError::bad_request("Invalid status", serde_json::json!({"status": s}))
                })
            })
            .transpose()
    }
}

/// Request body for `POST /jobs`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Title, description, and companyId are required"))]
    pub title: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Title, description, and companyId are required"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Title, description, and companyId are required"))]
    pub company_id: String,

    pub location: Option<String>,
    pub category: Option<String>,
    pub company_name: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    /// Empty or null means "not given".
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    #[serde(default)]
    pub application_deadline: Option<Timestamp>,
    pub contact_email: Option<String>,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl From<CreateJobRequest> for Job {
    fn from(req: CreateJobRequest) -> Self {
        let now = Timestamp::now();
        Job {
            id: String::new(),
            title: req.title,
            description: req.description,
            location: or_default(req.location, "Remote"),
            category: or_default(req.category, "Other"),
            company_id: req.company_id,
            company_name: or_default(req.company_name, "Unknown Company"),
            requirements: req.requirements.unwrap_or_default(),
            salary_range: or_default(req.salary_range, "Negotiable"),
            job_type: or_default(req.job_type, "Full-time"),
            application_deadline: req
                .application_deadline
                .unwrap_or_else(|| Timestamp::days_from_now(DEFAULT_DEADLINE_DAYS)),
            contact_email: req.contact_email.unwrap_or_default(),
            status: JobStatus::Active,
            views: 0,
            applications: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for `PUT /jobs/{id}`. `companyId` cannot be moved.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[validate(custom(function = "non_blank", message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(custom(function = "non_blank", message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub company_name: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    /// Empty or null means "not given".
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    #[serde(default)]
    pub application_deadline: Option<Timestamp>,
    pub contact_email: Option<String>,
    pub status: Option<JobStatus>,
}

impl From<UpdateJobRequest> for JobPatch {
    fn from(req: UpdateJobRequest) -> Self {
        JobPatch {
            title: req.title,
            description: req.description,
            location: req.location,
            category: req.category,
            company_name: req.company_name,
            requirements: req.requirements,
            salary_range: req.salary_range,
            job_type: req.job_type,
            application_deadline: req.application_deadline,
            contact_email: req.contact_email,
            status: req.status,
            updated_at: None,
        }
    }
}

/// Request body for `POST /jobs/{id}/apply`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "studentId is required"))]
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid student email"))]
    pub student_email: Option<String>,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub resume_url: String,
}

impl From<ApplyRequest> for NewJobApplication {
    fn from(req: ApplyRequest) -> Self {
        NewJobApplication {
            student_id: req.student_id,
            student_name: req.student_name,
            student_email: req.student_email.unwrap_or_default(),
            cover_letter: req.cover_letter,
            resume_url: req.resume_url,
        }
    }
}
