//! DTOs for admin authentication and account management.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::validation::non_blank;
use crate::domain::entities::{Admin, AdminRole};
use crate::utils::timestamp::Timestamp;

/// Request body for `POST /admin/login`. Emptiness is checked by the service.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /admin/setup` and `POST /admin/accounts`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminAccountRequest {
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    /// Ignored by setup, which always creates a super admin.
    #[serde(default)]
    pub role: AdminRole,
}

/// Public view of an admin. The password hash is never serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl AdminProfile {
    /// Profile without the creation date, as returned on login.
    pub fn summary(admin: &Admin) -> Self {
        Self {
            created_at: None,
            ..Self::from(admin)
        }
    }
}

impl From<&Admin> for AdminProfile {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id.clone(),
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role,
            created_at: Some(admin.created_at),
        }
    }
}

/// Response of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub admin: AdminProfile,
}
