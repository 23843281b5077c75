//! Institutions and their published admission rounds.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::utils::timestamp::Timestamp;

fn default_status() -> String {
    "active".to_string()
}

/// A higher-education institution.
///
/// `code` is stored uppercased and is unique across institutions; the
/// uniqueness is enforced by the service before every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub admissions_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admissions_updated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Institution {
    pub fn new(
        name: String,
        code: String,
        kind: String,
        location: String,
        contact_email: String,
        description: String,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: String::new(),
            name,
            code,
            kind,
            location,
            contact_email,
            description,
            status: default_status(),
            admissions_published: false,
            admissions_updated_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of an institution. `None` leaves a field unchanged.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub admissions_published: Option<bool>,
    pub admissions_updated_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

/// Academic year of an admission round: either a plain year or a label such
/// as `"2025/2026"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AcademicYear {
    Year(i64),
    Label(String),
}

impl AcademicYear {
    pub fn current() -> Self {
        use chrono::Datelike;
        AcademicYear::Year(i64::from(chrono::Utc::now().year()))
    }
}

/// A published admission round for an institution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub institution_id: String,
    pub academic_year: AcademicYear,
    pub deadline: Timestamp,
    pub status: String,
    pub published_at: Timestamp,
    pub created_at: Timestamp,
}
