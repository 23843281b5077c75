//! DTOs for company endpoints.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::api::dto::validation::non_blank;
use crate::domain::document::Fields;
use crate::domain::entities::{Company, CompanyStatus};

/// Query parameters for `GET /companies`. An empty `status` means no filter.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct CompanyListQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<String>,
}

/// Request body for `POST /companies`. Extra profile fields are kept.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,

    #[serde(flatten)]
    pub profile: Fields,
}

impl From<CreateCompanyRequest> for Company {
    fn from(req: CreateCompanyRequest) -> Self {
        let mut profile = req.profile;
        // Moderation fields are owned by the platform.
        for key in ["id", "status", "approvedAt", "createdAt", "updatedAt"] {
            profile.remove(key);
        }

        Company {
            id: String::new(),
            name: req.name.trim().to_string(),
            email: req.email,
            location: req.location,
            industry: req.industry,
            status: CompanyStatus::Pending,
            approved_at: None,
            created_at: None,
            updated_at: None,
            profile,
        }
    }
}
