//! System statistics and application reports.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::domain::document::{Collection, Document, Query};
use crate::domain::entities::Application;
use crate::domain::reports::{self, InstitutionTally, StatusCounts};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;

/// Platform-wide counters shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_users: u64,
    pub total_institutions: u64,
    pub total_companies: u64,
    pub total_applications: u64,
    pub pending_applications: u64,
    pub approved_applications: u64,
    pub rejected_applications: u64,
    pub pending_companies: u64,
    pub active_companies: u64,
    pub suspended_companies: u64,
}

/// Application report across institutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReport {
    pub applications: StatusCounts,
    pub unique_students: u64,
    pub institutions: Vec<InstitutionTally>,
}

fn status_of(doc: &Document) -> Option<&str> {
    doc.get("status").and_then(Value::as_str)
}

/// Service computing statistics from full collection scans.
pub struct StatsService<R: DocumentRepository + ?Sized = dyn DocumentRepository> {
    repository: Arc<R>,
}

impl<R: DocumentRepository + ?Sized> StatsService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Counts users, institutions, companies and applications with their
    /// status breakdowns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn system_stats(&self) -> Result<SystemStats, AppError> {
        info!("Generating system statistics");

        let (applications, institutions, companies, users) = tokio::join!(
            self.repository.query(Collection::Applications, Query::new()),
            self.repository.count(Collection::Institutions),
            self.repository.query(Collection::Companies, Query::new()),
            self.repository.count(Collection::Users),
        );
        let (applications, institutions, companies, users) =
            (applications?, institutions?, companies?, users?);

        let app_counts = StatusCounts::tally(applications.iter().map(status_of));
        let company_counts = reports::company_counts(companies.iter().map(status_of));

        let stats = SystemStats {
            total_users: users,
            total_institutions: institutions,
            total_companies: company_counts.total,
            total_applications: app_counts.total,
            pending_applications: app_counts.pending,
            approved_applications: app_counts.approved,
            rejected_applications: app_counts.rejected,
            pending_companies: company_counts.pending,
            active_companies: company_counts.approved,
            suspended_companies: company_counts.suspended,
        };

        info!(?stats, "System stats generated");
        Ok(stats)
    }

    /// Application status tallies overall and per institution.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn application_report(&self) -> Result<ApplicationReport, AppError> {
        let applications = self.applications().await?;

        Ok(ApplicationReport {
            applications: reports::application_counts(&applications),
            unique_students: reports::unique_students(&applications),
            institutions: reports::per_institution(&applications),
        })
    }

    /// Distinct institution ids that have received applications.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn institutions_with_applications(&self) -> Result<Vec<String>, AppError> {
        let applications = self.applications().await?;
        let institutions = reports::distinct_institutions(&applications);

        info!(count = institutions.len(), "Fetched institutions from applications");
        Ok(institutions)
    }

    async fn applications(&self) -> Result<Vec<Application>, AppError> {
        self.repository
            .query(Collection::Applications, Query::new())
            .await?
            .into_iter()
            .map(|d| d.decode())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Fields;
    use crate::domain::repositories::MockDocumentRepository;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        Document::new(id, value.as_object().cloned().unwrap_or_else(Fields::new))
    }

    #[tokio::test]
    async fn test_system_stats_exact_tallies() {
        let mut mock_repo = MockDocumentRepository::new();

        mock_repo
            .expect_query()
            .withf(|c, _| *c == Collection::Applications)
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    doc("a1", json!({"status": "pending"})),
                    doc("a2", json!({"status": "pending"})),
                    doc("a3", json!({"status": "approved"})),
                    doc("a4", json!({"status": "rejected"})),
                ])
            });
        mock_repo
            .expect_query()
            .withf(|c, _| *c == Collection::Companies)
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    doc("c1", json!({"status": "approved"})),
                    doc("c2", json!({"status": "suspended"})),
                ])
            });
        mock_repo
            .expect_count()
            .withf(|c| *c == Collection::Institutions)
            .returning(|_| Ok(3));
        mock_repo
            .expect_count()
            .withf(|c| *c == Collection::Users)
            .returning(|_| Ok(12));

        let service = StatsService::new(Arc::new(mock_repo));

        let stats = service.system_stats().await.unwrap();
        assert_eq!(
            stats,
            SystemStats {
                total_users: 12,
                total_institutions: 3,
                total_companies: 2,
                total_applications: 4,
                pending_applications: 2,
                approved_applications: 1,
                rejected_applications: 1,
                pending_companies: 0,
                active_companies: 1,
                suspended_companies: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_system_stats_propagates_store_error() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo
            .expect_query()
            .returning(|_, _| Err(AppError::internal("connection refused", Value::Null)));
        mock_repo.expect_count().returning(|_| Ok(0));

        let service = StatsService::new(Arc::new(mock_repo));

        let err = service.system_stats().await.unwrap_err();
        assert_eq!(err.message(), "connection refused");
    }

    #[tokio::test]
    async fn test_institutions_with_applications() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo.expect_query().times(1).returning(|_, _| {
            Ok(vec![
                doc("a1", json!({"institutionId": "limkokwing"})),
                doc("a2", json!({})),
                doc("a3", json!({"institutionId": "nul"})),
                doc("a4", json!({"institutionId": "limkokwing"})),
            ])
        });

        let service = StatsService::new(Arc::new(mock_repo));

        let ids = service.institutions_with_applications().await.unwrap();
        assert_eq!(ids, vec!["limkokwing", "nul"]);
    }

    #[tokio::test]
    async fn test_application_report() {
        let mut mock_repo = MockDocumentRepository::new();
        mock_repo.expect_query().times(1).returning(|_, _| {
            Ok(vec![
                doc("a1", json!({"studentId": "s1", "institutionId": "nul", "status": "approved"})),
                doc("a2", json!({"studentId": "s1", "institutionId": "luct", "status": "pending"})),
            ])
        });

        let service = StatsService::new(Arc::new(mock_repo));

        let report = service.application_report().await.unwrap();
        assert_eq!(report.applications.total, 2);
        assert_eq!(report.unique_students, 1);
        assert_eq!(report.institutions.len(), 2);
    }
}
