//! Admission applications submitted by students to institutions.
//!
//! These documents are written by the student-facing side of the platform;
//! this service only reads them and moves them between review states.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::document::Fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 3] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admission application as stored. Every field passes through untouched;
/// the accessors read the ones used for filtering and reporting and treat a
/// non-string value as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Application {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Application {
    fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn student_id(&self) -> Option<&str> {
        self.text("studentId")
    }

    pub fn institution_id(&self) -> Option<&str> {
        self.text("institutionId")
    }

    pub fn status(&self) -> Option<&str> {
        self.text("status")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_decode() {
        let app: Application = serde_json::from_value(json!({
            "id": "a1",
            "institutionId": "limkokwing",
            "courseName": "BSc Software Engineering"
        }))
        .unwrap();

        assert_eq!(app.institution_id(), Some("limkokwing"));
        assert!(app.status().is_none());
        assert_eq!(app.fields["courseName"], "BSc Software Engineering");
    }

    #[test]
    fn test_non_string_fields_pass_through() {
        let raw = json!({
            "id": "a2",
            "studentId": 42,
            "institutionId": null,
            "status": ["pending"],
            "grades": {"math": "A"}
        });
        let app: Application = serde_json::from_value(raw.clone()).unwrap();

        assert!(app.student_id().is_none());
        assert!(app.institution_id().is_none());
        assert!(app.status().is_none());
        assert_eq!(serde_json::to_value(&app).unwrap(), raw);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ApplicationStatus::parse("rejected"), Some(ApplicationStatus::Rejected));
        assert_eq!(ApplicationStatus::parse("maybe"), None);
    }
}
