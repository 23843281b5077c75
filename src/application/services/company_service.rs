//! Company moderation.

use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::domain::document::{Collection, Fields, Query, to_fields};
use crate::domain::entities::{Company, CompanyStatus};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::utils::timestamp::Timestamp;

pub struct CompanyService<R: DocumentRepository + ?Sized = dyn DocumentRepository> {
    repository: Arc<R>,
}

impl<R: DocumentRepository + ?Sized> CompanyService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists companies, optionally only those in `status`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list(&self, status: Option<CompanyStatus>) -> Result<Vec<Company>, AppError> {
        let query = Query::new().filter_opt("status", status.map(|s| s.as_str()));
        let docs = self.repository.query(Collection::Companies, query).await?;

        info!(status = ?status, count = docs.len(), "Fetched companies");
        docs.into_iter().map(|d| d.decode()).collect()
    }

    /// Registers a company. New companies always start out pending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create(&self, mut company: Company) -> Result<Company, AppError> {
        let now = Timestamp::now();
        company.status = CompanyStatus::Pending;
        company.approved_at = None;
        company.created_at = Some(now);
        company.updated_at = Some(now);

        info!(name = %company.name, "Registering company");

        self.repository
            .add(Collection::Companies, to_fields(&company)?)
            .await?
            .decode()
    }

    /// Moves a company to `status`, stamping `approvedAt` on approval.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `status` is not a company status.
    /// Returns [`AppError::NotFound`] if the company does not exist.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<Company, AppError> {
        let status = CompanyStatus::parse(status).ok_or_else(|| {
            AppError::bad_request(
                "Invalid status. Must be: pending, approved, or suspended",
                json!({"status": status}),
            )
        })?;
        let now = Timestamp::now().to_string();

        let mut patch = Fields::new();
        patch.insert("status".to_string(), Value::from(status.as_str()));
        patch.insert("updatedAt".to_string(), Value::from(now.clone()));
        if status == CompanyStatus::Approved {
            patch.insert("approvedAt".to_string(), Value::from(now));
        }

        info!(company_id = %id, status = %status, "Updating company status");

        self.repository
            .update(Collection::Companies, id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Company not found", json!({"id": id})))?
            .decode()
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the company does not exist.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        info!(company_id = %id, "Deleting company");

        if !self.repository.delete(Collection::Companies, id).await? {
            return Err(AppError::not_found("Company not found", json!({"id": id})));
        }
        Ok(())
    }
}
