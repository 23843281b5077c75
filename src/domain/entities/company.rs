//! Companies posting jobs on the platform.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::document::Fields;
use crate::utils::timestamp::Timestamp;

/// Moderation state of a company account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    #[default]
    Pending,
    Approved,
    Suspended,
}

impl CompanyStatus {
    pub const ALL: [CompanyStatus; 3] = [
        CompanyStatus::Pending,
        CompanyStatus::Approved,
        CompanyStatus::Suspended,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyStatus::Pending => "pending",
            CompanyStatus::Approved => "approved",
            CompanyStatus::Suspended => "suspended",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A company profile.
///
/// Profile fields maintained by the company itself (logo, website, ...) are
/// not interpreted here and are carried through untouched in `profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default)]
    pub status: CompanyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(flatten)]
    pub profile: Fields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parse() {
        assert_eq!(CompanyStatus::parse("approved"), Some(CompanyStatus::Approved));
        assert_eq!(CompanyStatus::parse("Approved"), None);
        assert_eq!(CompanyStatus::parse("deleted"), None);
    }

    #[test]
    fn test_unknown_profile_fields_survive() {
        let raw = json!({
            "id": "c1",
            "name": "Tech Traders Ltd",
            "status": "approved",
            "website": "https://techtraders.example"
        });

        let company: Company = serde_json::from_value(raw).unwrap();
        assert_eq!(company.status, CompanyStatus::Approved);
        assert_eq!(company.profile["website"], "https://techtraders.example");

        let back = serde_json::to_value(&company).unwrap();
        assert_eq!(back["website"], "https://techtraders.example");
    }

    #[test]
    fn test_missing_status_defaults_to_pending() {
        let company: Company = serde_json::from_value(json!({"id": "c2", "name": "CodeHub"})).unwrap();
        assert_eq!(company.status, CompanyStatus::Pending);
    }
}
