//! Faculties belong to an institution; courses belong to a faculty.

use serde::{Deserialize, Serialize};

use crate::utils::timestamp::Timestamp;

pub const DEFAULT_COURSE_DURATION: &str = "4 years";
pub const DEFAULT_COURSE_CAPACITY: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faculty {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub institution_id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub faculty_id: String,
    pub name: String,
    pub code: String,
    pub duration: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub description: String,
    pub capacity: u32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
