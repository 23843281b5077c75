//! Institution management and admission publishing.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::domain::document::{Collection, Direction, Query, to_fields};
use crate::domain::entities::{AcademicYear, Admission, Institution, InstitutionPatch};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::utils::id_generator::normalize_code;
use crate::utils::timestamp::Timestamp;

/// Days an admission round stays open when no deadline is given.
const DEFAULT_ADMISSION_DAYS: i64 = 30;

/// Service for institutions and their admission rounds.
///
/// Institution codes are stored uppercased and kept unique across create and
/// update. Deleting an institution leaves its faculties, courses and
/// admissions in place.
pub struct InstitutionService<R: DocumentRepository + ?Sized = dyn DocumentRepository> {
    repository: Arc<R>,
}

impl<R: DocumentRepository + ?Sized> InstitutionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists all institutions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list(&self) -> Result<Vec<Institution>, AppError> {
        let docs = self
            .repository
            .query(
                Collection::Institutions,
                Query::new().order_by("createdAt", Direction::Desc),
            )
            .await?;

        info!(count = docs.len(), "Fetched institutions");
        docs.into_iter().map(|d| d.decode()).collect()
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the institution does not exist.
    pub async fn get(&self, id: &str) -> Result<Institution, AppError> {
        self.repository
            .get(Collection::Institutions, id)
            .await?
            .ok_or_else(|| AppError::not_found("Institution not found", json!({"id": id})))?
            .decode()
    }

    /// Creates an institution after normalizing and checking its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the code is malformed or already
    /// taken (case-insensitively).
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create(&self, mut institution: Institution) -> Result<Institution, AppError> {
        institution.code = normalize_code(&institution.code)?;
        self.ensure_code_available(&institution.code, None).await?;

        info!(name = %institution.name, code = %institution.code, "Adding institution");

        let doc = self
            .repository
            .add(Collection::Institutions, to_fields(&institution)?)
            .await?;
        doc.decode()
    }

    /// Applies a partial update. A new code is normalized and must stay unique.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the institution does not exist.
    /// Returns [`AppError::Validation`] on a malformed or duplicate code.
    pub async fn update(
        &self,
        id: &str,
        mut patch: InstitutionPatch,
    ) -> Result<Institution, AppError> {
        if let Some(code) = patch.code.as_deref() {
            let code = normalize_code(code)?;
            self.ensure_code_available(&code, Some(id)).await?;
            patch.code = Some(code);
        }
        patch.updated_at = Some(Timestamp::now());

        info!(institution_id = %id, "Updating institution");

        self.repository
            .update(Collection::Institutions, id, to_fields(&patch)?)
            .await?
            .ok_or_else(|| AppError::not_found("Institution not found", json!({"id": id})))?
            .decode()
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the institution does not exist.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        info!(institution_id = %id, "Deleting institution");

        if !self.repository.delete(Collection::Institutions, id).await? {
            return Err(AppError::not_found(
                "Institution not found",
                json!({"id": id}),
            ));
        }
        Ok(())
    }

    /// Publishes an admission round and flags the institution as accepting
    /// applications.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the institution does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn publish_admissions(
        &self,
        institution_id: &str,
        academic_year: Option<AcademicYear>,
        deadline: Option<Timestamp>,
    ) -> Result<Admission, AppError> {
        // 404 before writing anything
        self.get(institution_id).await?;

        info!(institution_id = %institution_id, "Publishing admissions");

        let now = Timestamp::now();
        let admission = Admission {
            id: String::new(),
            institution_id: institution_id.to_string(),
            academic_year: academic_year.unwrap_or_else(AcademicYear::current),
            deadline: deadline.unwrap_or_else(|| Timestamp::days_from_now(DEFAULT_ADMISSION_DAYS)),
            status: "published".to_string(),
            published_at: now,
            created_at: now,
        };

        let doc = self
            .repository
            .add(Collection::Admissions, to_fields(&admission)?)
            .await?;

        let patch = InstitutionPatch {
            admissions_published: Some(true),
            admissions_updated_at: Some(now),
            updated_at: Some(now),
            ..Default::default()
        };
        self.repository
            .update(Collection::Institutions, institution_id, to_fields(&patch)?)
            .await?;

        doc.decode()
    }

    async fn ensure_code_available(&self, code: &str, except_id: Option<&str>) -> Result<(), AppError> {
        let existing = self
            .repository
            .query(Collection::Institutions, Query::new().filter("code", code))
            .await?;

        if existing.iter().any(|doc| Some(doc.id.as_str()) != except_id) {
            return Err(AppError::bad_request(
                "Institution with this code already exists",
                json!({"code": code}),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Document;
    use crate::domain::repositories::MockDocumentRepository;

    fn institution(code: &str) -> Institution {
        Institution::new(
            "National University of Lesotho".to_string(),
            code.to_string(),
            "university".to_string(),
            "Roma".to_string(),
            "info@nul.ls".to_string(),
            String::new(),
        )
    }

    fn stored(id: &str, institution: &Institution) -> Document {
        Document::new(id, to_fields(institution).unwrap())
    }

    #[tokio::test]
    async fn test_create_uppercases_code() {
        let mut mock_repo = MockDocumentRepository::new();

        mock_repo
            .expect_query()
            .withf(|c, q| *c == Collection::Institutions && q.filters[0].value == "NUL")
            .times(1)
            .returning(|_, _| Ok(vec![]));

        mock_repo
            .expect_add()
            .withf(|c, fields| *c == Collection::Institutions && fields["code"] == "NUL")
            .times(1)
            .returning(|_, fields| Ok(Document::new("inst-1", fields)));

        let service = InstitutionService::new(Arc::new(mock_repo));

        let created = service.create(institution("nul")).await.unwrap();
        assert_eq!(created.id, "inst-1");
        assert_eq!(created.code, "NUL");
    }

    #[tokio::test]
    async fn test_create_duplicate_code() {
        let mut mock_repo = MockDocumentRepository::new();

        let existing = stored("inst-1", &institution("NUL"));
        mock_repo
            .expect_query()
            .times(1)
            .returning(move |_, _| Ok(vec![existing.clone()]));
        mock_repo.expect_add().never();

        let service = InstitutionService::new(Arc::new(mock_repo));

        let err = service.create(institution("nul")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.message(), "Institution with this code already exists");
    }

    #[tokio::test]
    async fn test_update_keeps_own_code() {
        let mut mock_repo = MockDocumentRepository::new();

        let existing = stored("inst-1", &institution("NUL"));
        let updated = existing.clone();
        mock_repo
            .expect_query()
            .times(1)
            .returning(move |_, _| Ok(vec![existing.clone()]));
        mock_repo
            .expect_update()
            .withf(|_, id, patch| id == "inst-1" && patch.contains_key("updatedAt"))
            .times(1)
            .returning(move |_, _, _| Ok(Some(updated.clone())));

        let service = InstitutionService::new(Arc::new(mock_repo));

        let patch = InstitutionPatch {
            code: Some("nul".to_string()),
            ..Default::default()
        };
        assert!(service.update("inst-1", patch).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo
            .expect_update()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let service = InstitutionService::new(Arc::new(mock_repo));

        let err = service
            .update("missing", InstitutionPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo.expect_delete().times(1).returning(|_, _| Ok(false));

        let service = InstitutionService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.delete("missing").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_publish_admissions_flags_institution() {
        let mut mock_repo = MockDocumentRepository::new();

        let existing = stored("inst-1", &institution("NUL"));
        mock_repo
            .expect_get()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        mock_repo
            .expect_add()
            .withf(|c, fields| {
                *c == Collection::Admissions
                    && fields["institutionId"] == "inst-1"
                    && fields["status"] == "published"
            })
            .times(1)
            .returning(|_, fields| Ok(Document::new("adm-1", fields)));
        mock_repo
            .expect_update()
            .withf(|c, id, patch| {
                *c == Collection::Institutions
                    && id == "inst-1"
                    && patch["admissionsPublished"] == true
            })
            .times(1)
            .returning(|_, id, patch| Ok(Some(Document::new(id, patch))));

        let service = InstitutionService::new(Arc::new(mock_repo));

        let admission = service
            .publish_admissions("inst-1", Some(AcademicYear::Year(2026)), None)
            .await
            .unwrap();
        assert_eq!(admission.id, "adm-1");
        assert_eq!(admission.academic_year, AcademicYear::Year(2026));
    }

    #[tokio::test]
    async fn test_publish_admissions_missing_institution() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo.expect_get().times(1).returning(|_, _| Ok(None));
        mock_repo.expect_add().never();

        let service = InstitutionService::new(Arc::new(mock_repo));

        let err = service
            .publish_admissions("missing", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
