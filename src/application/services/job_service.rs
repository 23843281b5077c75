//! Job postings and job applications.

use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::document::{
    Collection, CounterRef, Direction, Fields, Filter, GuardedInsert, GuardedOutcome, Query,
    to_fields,
};
use crate::domain::entities::{
    Job, JobApplication, JobApplicationStatus, JobPatch, JobStatus, NewJobApplication,
};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::utils::timestamp::Timestamp;

/// Service for job postings and the applications students send to them.
///
/// Applying for a job is a single guarded insert: the application is stored
/// and the job's `applications` counter bumped together, and a second
/// application by the same student is refused.
pub struct JobService<R: DocumentRepository + ?Sized = dyn DocumentRepository> {
    repository: Arc<R>,
}

fn job_not_found(id: &str) -> AppError {
    AppError::not_found("Job not found", json!({"id": id}))
}

impl<R: DocumentRepository + ?Sized> JobService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists jobs newest first, optionally filtered by company and status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list(
        &self,
        company_id: Option<&str>,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>, AppError> {
        let query = Query::new()
            .filter_opt("companyId", company_id)
            .filter_opt("status", status.map(|s| s.as_str()))
            .order_by("createdAt", Direction::Desc);

        let docs = self.repository.query(Collection::Jobs, query).await?;

        info!(company_id = ?company_id, status = ?status, count = docs.len(), "Fetched jobs");
        docs.into_iter().map(|d| d.decode()).collect()
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the job does not exist.
    pub async fn get(&self, id: &str) -> Result<Job, AppError> {
        self.repository
            .get(Collection::Jobs, id)
            .await?
            .ok_or_else(|| job_not_found(id))?
            .decode()
    }

    /// Posts a job. Counters and status start fresh regardless of input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create(&self, mut job: Job) -> Result<Job, AppError> {
        let now = Timestamp::now();
        job.status = JobStatus::Active;
        job.views = 0;
        job.applications = 0;
        job.created_at = now;
        job.updated_at = now;

        info!(title = %job.title, company_id = %job.company_id, "Creating job posting");

        let created: Job = self
            .repository
            .add(Collection::Jobs, to_fields(&job)?)
            .await?
            .decode()?;

        info!(job_id = %created.id, "Job created");
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the job does not exist.
    pub async fn update(&self, id: &str, mut patch: JobPatch) -> Result<Job, AppError> {
        patch.updated_at = Some(Timestamp::now());

        info!(job_id = %id, "Updating job");

        self.repository
            .update(Collection::Jobs, id, to_fields(&patch)?)
            .await?
            .ok_or_else(|| job_not_found(id))?
            .decode()
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `status` is not active, closed or draft.
    /// Returns [`AppError::NotFound`] if the job does not exist.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<Job, AppError> {
        let status = JobStatus::parse(status).ok_or_else(|| {
            AppError::bad_request(
                "Invalid status. Must be: active, closed, or draft",
                json!({"status": status}),
            )
        })?;

        info!(job_id = %id, status = %status, "Updating job status");

        let patch = JobPatch {
            status: Some(status),
            ..Default::default()
        };
        self.update(id, patch).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the job does not exist.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        info!(job_id = %id, "Deleting job");

        if !self.repository.delete(Collection::Jobs, id).await? {
            return Err(job_not_found(id));
        }
        Ok(())
    }

    /// Records a student's application and bumps the job's counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `student_id` is empty or the
    /// student already applied for this job.
    /// Returns [`AppError::NotFound`] if the job does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn apply(
        &self,
        job_id: &str,
        input: NewJobApplication,
    ) -> Result<JobApplication, AppError> {
        if input.student_id.trim().is_empty() {
            return Err(AppError::bad_request(
                "studentId is required",
                json!({"field": "studentId"}),
            ));
        }

        info!(student_id = %input.student_id, job_id = %job_id, "Student applying for job");

        let job = self.get(job_id).await?;

        let now = Timestamp::now();
        let application = JobApplication {
            id: String::new(),
            job_id: job.id.clone(),
            job_title: job.title,
            company_id: job.company_id,
            company_name: job.company_name,
            student_id: input.student_id,
            student_name: input.student_name,
            student_email: input.student_email,
            cover_letter: input.cover_letter,
            resume_url: input.resume_url,
            status: JobApplicationStatus::Pending,
            applied_at: now,
            created_at: now,
            updated_at: None,
        };

        let insert = GuardedInsert {
            collection: Collection::JobApplications,
            data: to_fields(&application)?,
            unique_on: vec![
                Filter::eq("jobId", job.id.clone()),
                Filter::eq("studentId", application.student_id.clone()),
            ],
            counter: CounterRef {
                collection: Collection::Jobs,
                id: job.id.clone(),
                field: "applications".to_string(),
            },
        };

        match self.repository.insert_guarded(insert).await? {
            GuardedOutcome::Inserted(doc) => {
                info!(application_id = %doc.id, "Job application created");
                doc.decode()
            }
            GuardedOutcome::Duplicate => Err(AppError::bad_request(
                "You have already applied for this job",
                json!({"jobId": job.id, "studentId": application.student_id}),
            )),
            GuardedOutcome::ParentMissing => {
                warn!(job_id = %job_id, "Job removed while applying");
                Err(job_not_found(job_id))
            }
        }
    }

    /// Applications received by a company, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn company_applications(
        &self,
        company_id: &str,
        status: Option<JobApplicationStatus>,
        job_id: Option<&str>,
    ) -> Result<Vec<JobApplication>, AppError> {
        let query = Query::new()
            .filter("companyId", company_id)
            .filter_opt("status", status.map(|s| s.as_str()))
            .filter_opt("jobId", job_id)
            .order_by("appliedAt", Direction::Desc);

        let docs = self
            .repository
            .query(Collection::JobApplications, query)
            .await?;

        info!(company_id = %company_id, count = docs.len(), "Fetched job applications");
        docs.into_iter().map(|d| d.decode()).collect()
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an unknown status.
    /// Returns [`AppError::NotFound`] if the application does not exist.
    pub async fn update_application_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<JobApplication, AppError> {
        let status = JobApplicationStatus::parse(status).ok_or_else(|| {
            AppError::bad_request(
                "Invalid status",
                json!({
                    "status": status,
                    "allowed": JobApplicationStatus::ALL.map(|s| s.as_str()),
                }),
            )
        })?;

        info!(application_id = %id, status = %status, "Updating job application status");

        let mut patch = Fields::new();
        patch.insert("status".to_string(), Value::from(status.as_str()));
        patch.insert(
            "updatedAt".to_string(),
            Value::from(Timestamp::now().to_string()),
        );

        self.repository
            .update(Collection::JobApplications, id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Job application not found", json!({"id": id})))?
            .decode()
    }
}
