//! DTOs for institution and admission endpoints.

use serde::Deserialize;
use serde_with::{DefaultOnNull, NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::api::dto::validation::non_blank;
use crate::domain::entities::{AcademicYear, Institution, InstitutionPatch};
use crate::utils::timestamp::Timestamp;

/// Request body for `POST /institutions`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstitutionRequest {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Code is required"))]
    pub code: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateInstitutionRequest> for Institution {
    fn from(req: CreateInstitutionRequest) -> Self {
        Institution::new(
            req.name.trim().to_string(),
            req.code,
            req.kind,
            req.location,
            req.contact_email.unwrap_or_default(),
            req.description.unwrap_or_default(),
        )
    }
}

/// Request body for `PUT /institutions/{id}`. Only present fields change.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstitutionRequest {
    #[validate(custom(function = "non_blank", message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,
    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl From<UpdateInstitutionRequest> for InstitutionPatch {
    fn from(req: UpdateInstitutionRequest) -> Self {
        InstitutionPatch {
            name: req.name,
            code: req.code,
            kind: req.kind,
            location: req.location,
            contact_email: req.contact_email,
            description: req.description,
            status: req.status,
            ..Default::default()
        }
    }
}

/// Optional body of `POST /institutions/{id}/publish-admissions`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishAdmissionsRequest {
    pub academic_year: Option<AcademicYear>,
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    #[serde(default)]
    pub deadline: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_name_reports_message() {
        let req: CreateInstitutionRequest =
            serde_json::from_value(json!({"code": "nul"})).unwrap();

        let err = crate::error::AppError::from(req.validate().unwrap_err());
        assert_eq!(err.message(), "Name is required");
    }

    #[test]
    fn test_into_institution_defaults() {
        let req: CreateInstitutionRequest = serde_json::from_value(json!({
            "name": "Limkokwing University",
            "code": "luct",
            "type": "university"
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let inst = Institution::from(req);
        assert_eq!(inst.kind, "university");
        assert_eq!(inst.description, "");
        assert_eq!(inst.status, "active");
    }

    #[test]
    fn test_publish_request_blank_deadline() {
        let req: PublishAdmissionsRequest =
            serde_json::from_value(json!({"academicYear": 2026, "deadline": ""})).unwrap();
        assert_eq!(req.academic_year, Some(AcademicYear::Year(2026)));
        assert!(req.deadline.is_none());

        let req: PublishAdmissionsRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.deadline.is_none());
    }
}
