//! Review of admission applications.

use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use crate::domain::document::{Collection, Fields, Query};
use crate::domain::entities::{Application, ApplicationStatus};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::utils::timestamp::Timestamp;

fn application_not_found(id: &str) -> AppError {
    AppError::not_found("Application not found", json!({"id": id}))
}

/// Read and review access to admission applications submitted by students.
pub struct ApplicationService<R: DocumentRepository + ?Sized = dyn DocumentRepository> {
    repository: Arc<R>,
}

impl<R: DocumentRepository + ?Sized> ApplicationService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list(&self) -> Result<Vec<Application>, AppError> {
        let docs = self
            .repository
            .query(Collection::Applications, Query::new())
            .await?;

        info!(count = docs.len(), "Fetched applications");
        docs.into_iter().map(|d| d.decode()).collect()
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_for_institution(
        &self,
        institution_id: &str,
    ) -> Result<Vec<Application>, AppError> {
        let docs = self
            .repository
            .query(
                Collection::Applications,
                Query::new().filter("institutionId", institution_id),
            )
            .await?;

        info!(
            institution_id = %institution_id,
            count = docs.len(),
            "Fetched applications for institution"
        );
        docs.into_iter().map(|d| d.decode()).collect()
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the application does not exist.
    pub async fn get(&self, id: &str) -> Result<Application, AppError> {
        self.repository
            .get(Collection::Applications, id)
            .await?
            .ok_or_else(|| application_not_found(id))?
            .decode()
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `status` is not pending, approved or rejected.
    /// Returns [`AppError::NotFound`] if the application does not exist.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<Application, AppError> {
        let status = ApplicationStatus::parse(status).ok_or_else(|| {
            AppError::bad_request(
                "Invalid status. Must be: pending, approved, or rejected",
                json!({"status": status}),
            )
        })?;

        info!(application_id = %id, status = %status, "Updating application status");

        let mut patch = Fields::new();
        patch.insert("status".to_string(), Value::from(status.as_str()));
        patch.insert(
            "updatedAt".to_string(),
            Value::from(Timestamp::now().to_string()),
        );

        self.repository
            .update(Collection::Applications, id, patch)
            .await?
            .ok_or_else(|| application_not_found(id))?
            .decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Document;
    use crate::domain::repositories::MockDocumentRepository;

    #[tokio::test]
    async fn test_get_not_found() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo
            .expect_get()
            .withf(|c, id| *c == Collection::Applications && id == "missing")
            .times(1)
            .returning(|_, _| Ok(None));

        let service = ApplicationService::new(Arc::new(mock_repo));

        let err = service.get("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.message(), "Application not found");
    }

    #[tokio::test]
    async fn test_update_status_approved() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo
            .expect_update()
            .withf(|_, _, patch| patch["status"] == "approved")
            .times(1)
            .returning(|_, id, patch| Ok(Some(Document::new(id, patch))));

        let service = ApplicationService::new(Arc::new(mock_repo));

        let app = service.update_status("a-1", "approved").await.unwrap();
        assert_eq!(app.status(), Some("approved"));
    }

    #[tokio::test]
    async fn test_update_status_invalid() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo.expect_update().never();

        let service = ApplicationService::new(Arc::new(mock_repo));

        let err = service.update_status("a-1", "waitlisted").await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_list_for_institution() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo
            .expect_query()
            .withf(|_, q| q.filters[0].field == "institutionId" && q.filters[0].value == "limkokwing")
            .times(1)
            .returning(|_, _| {
                let fields = json!({"institutionId": "limkokwing", "status": "pending"});
                Ok(vec![Document::new("a-1", fields.as_object().unwrap().clone())])
            });

        let service = ApplicationService::new(Arc::new(mock_repo));

        let apps = service.list_for_institution("limkokwing").await.unwrap();
        assert_eq!(apps[0].institution_id(), Some("limkokwing"));
    }
}
