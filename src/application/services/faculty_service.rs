//! Faculties under institutions and courses under faculties.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::domain::document::{Collection, Query, to_fields};
use crate::domain::entities::{Course, Faculty};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::utils::id_generator::normalize_code;

/// Service for the academic structure of an institution.
///
/// Parents must exist when a child is created; nothing is cascaded on delete.
pub struct FacultyService<R: DocumentRepository + ?Sized = dyn DocumentRepository> {
    repository: Arc<R>,
}

impl<R: DocumentRepository + ?Sized> FacultyService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_faculties(&self, institution_id: &str) -> Result<Vec<Faculty>, AppError> {
        let docs = self
            .repository
            .query(
                Collection::Faculties,
                Query::new().filter("institutionId", institution_id),
            )
            .await?;

        info!(institution_id = %institution_id, count = docs.len(), "Fetched faculties");
        docs.into_iter().map(|d| d.decode()).collect()
    }

    /// Adds a faculty to an existing institution.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the institution does not exist.
    /// Returns [`AppError::Validation`] if the code is malformed.
    pub async fn create_faculty(&self, mut faculty: Faculty) -> Result<Faculty, AppError> {
        faculty.code = normalize_code(&faculty.code)?;

        if self
            .repository
            .get(Collection::Institutions, &faculty.institution_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "Institution not found",
                json!({"id": faculty.institution_id}),
            ));
        }

        info!(
            institution_id = %faculty.institution_id,
            code = %faculty.code,
            "Adding faculty"
        );

        self.repository
            .add(Collection::Faculties, to_fields(&faculty)?)
            .await?
            .decode()
    }

    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_courses(&self, faculty_id: &str) -> Result<Vec<Course>, AppError> {
        let docs = self
            .repository
            .query(Collection::Courses, Query::new().filter("facultyId", faculty_id))
            .await?;

        info!(faculty_id = %faculty_id, count = docs.len(), "Fetched courses");
        docs.into_iter().map(|d| d.decode()).collect()
    }

    /// Adds a course to an existing faculty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the faculty does not exist.
    /// Returns [`AppError::Validation`] if the code is malformed.
    pub async fn create_course(&self, mut course: Course) -> Result<Course, AppError> {
        course.code = normalize_code(&course.code)?;

        if self
            .repository
            .get(Collection::Faculties, &course.faculty_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(
                "Faculty not found",
                json!({"id": course.faculty_id}),
            ));
        }

        info!(faculty_id = %course.faculty_id, code = %course.code, "Adding course");

        self.repository
            .add(Collection::Courses, to_fields(&course)?)
            .await?
            .decode()
    }
}
