//! DTOs for faculty and course endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::api::dto::validation::non_blank;
use crate::domain::entities::{Course, DEFAULT_COURSE_CAPACITY, DEFAULT_COURSE_DURATION, Faculty};
use crate::utils::timestamp::Timestamp;

/// Request body for `POST /institutions/{id}/faculties`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFacultyRequest {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Code is required"))]
    pub code: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl CreateFacultyRequest {
    pub fn into_faculty(self, institution_id: String) -> Faculty {
        let now = Timestamp::now();
        Faculty {
            id: String::new(),
            institution_id,
            name: self.name.trim().to_string(),
            code: self.code,
            description: self.description.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request body for `POST /faculties/{id}/courses`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Code is required"))]
    pub code: String,

    pub duration: Option<String>,
    pub requirements: Option<String>,
    pub description: Option<String>,

    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: Option<u32>,
}

impl CreateCourseRequest {
    pub fn into_course(self, faculty_id: String) -> Course {
        let now = Timestamp::now();
        Course {
            id: String::new(),
            faculty_id,
            name: self.name.trim().to_string(),
            code: self.code,
            duration: self
                .duration
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COURSE_DURATION.to_string()),
            requirements: self.requirements.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            capacity: self.capacity.unwrap_or(DEFAULT_COURSE_CAPACITY),
            status: "active".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_defaults() {
        let req: CreateCourseRequest =
            serde_json::from_value(json!({"name": "Software Engineering", "code": "bse"}))
                .unwrap();
        assert!(req.validate().is_ok());

        let course = req.into_course("fac-1".to_string());
        assert_eq!(course.duration, "4 years");
        assert_eq!(course.capacity, 100);
        assert_eq!(course.status, "active");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let req: CreateCourseRequest =
            serde_json::from_value(json!({"name": "X", "code": "x", "capacity": 0})).unwrap();
        assert!(req.validate().is_err());
    }
}
