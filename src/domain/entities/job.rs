//! Job postings and the applications students submit to them.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt;

use crate::utils::timestamp::Timestamp;

/// Days a posting stays open when no deadline is supplied.
pub const DEFAULT_DEADLINE_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
    Draft,
}

impl JobStatus {
    pub const ALL: [JobStatus; 3] = [JobStatus::Active, JobStatus::Closed, JobStatus::Draft];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
            JobStatus::Draft => "draft",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
    Interview,
}

impl JobApplicationStatus {
    pub const ALL: [JobApplicationStatus; 5] = [
        JobApplicationStatus::Pending,
        JobApplicationStatus::Reviewed,
        JobApplicationStatus::Accepted,
        JobApplicationStatus::Rejected,
        JobApplicationStatus::Interview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobApplicationStatus::Pending => "pending",
            JobApplicationStatus::Reviewed => "reviewed",
            JobApplicationStatus::Accepted => "accepted",
            JobApplicationStatus::Rejected => "rejected",
            JobApplicationStatus::Interview => "interview",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for JobApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job posting. `applications` counts submitted job applications and is
/// only ever incremented together with the application insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub company_id: String,
    pub company_name: String,
    #[serde(default)]
    pub requirements: String,
    pub salary_range: String,
    pub job_type: String,
    pub application_deadline: Timestamp,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub applications: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial update of a job posting.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub company_name: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub application_deadline: Option<Timestamp>,
    pub contact_email: Option<String>,
    pub status: Option<JobStatus>,
    pub updated_at: Option<Timestamp>,
}

/// A student's application to a job posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    pub company_id: String,
    #[serde(default)]
    pub company_name: String,
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub resume_url: String,
    #[serde(default)]
    pub status: JobApplicationStatus,
    pub applied_at: Timestamp,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Student details submitted with a job application.
#[derive(Debug, Clone, Default)]
pub struct NewJobApplication {
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    pub cover_letter: String,
    pub resume_url: String,
}
