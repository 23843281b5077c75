//! Administrator authentication and account management.

use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::document::{Collection, Direction, Fields, Query, to_fields};
use crate::domain::entities::{Admin, AdminRole};
use crate::domain::repositories::DocumentRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::session_token::TokenSigner;
use crate::utils::timestamp::Timestamp;

/// Credentials and profile for a new administrator.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: AdminRole,
}

/// Result of a bootstrap attempt.
#[derive(Debug, Clone)]
pub enum SetupOutcome {
    Created(Admin),
    AlreadyExists,
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password", Value::Null)
}

fn invalid_token() -> AppError {
    AppError::unauthorized("Invalid token", Value::Null)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Service issuing and checking admin session tokens.
///
/// Passwords are stored as Argon2id hashes (see [`crate::utils::password`]).
/// Tokens are signed and expiring; on every authenticated request the admin
/// document is re-read so a deactivated account loses access immediately.
pub struct AuthService<R: DocumentRepository + ?Sized = dyn DocumentRepository> {
    repository: Arc<R>,
    signer: TokenSigner,
}

impl<R: DocumentRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - document store holding the `admins` collection
    /// - `signer` - token signer; its secret must be shared by every instance
    pub fn new(repository: Arc<R>, signer: TokenSigner) -> Self {
        Self { repository, signer }
    }

    /// Checks credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if email or password is empty.
    /// Returns [`AppError::Unauthorized`] if no active admin matches the
    /// credentials. The message does not reveal which part was wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Admin), AppError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "Email and password are required",
                Value::Null,
            ));
        }

        info!(email = %email, "Admin login attempt");

        let query = Query::new()
            .filter("email", email.as_str())
            .filter("isActive", true)
            .limit(1);
        let Some(doc) = self
            .repository
            .query(Collection::Admins, query)
            .await?
            .into_iter()
            .next()
        else {
            warn!(email = %email, "Login rejected: unknown or inactive admin");
            return Err(invalid_credentials());
        };

        let admin: Admin = doc.decode()?;
        if !verify_password(password, &admin.password_hash) {
            warn!(email = %email, "Login rejected: wrong password");
            return Err(invalid_credentials());
        }

        let claims = self.signer.claims_for(&admin.id, admin.role, Utc::now());
        let token = self.signer.sign(&claims).map_err(|e| {
            AppError::internal(format!("Failed to issue session token: {e}"), Value::Null)
        })?;

        info!(admin_id = %admin.id, "Admin logged in");
        Ok((token, admin))
    }

    /// Resolves a bearer token to the active admin it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with "Invalid token" if the token
    /// fails verification or its admin no longer exists, and with
    /// "Admin account deactivated" if the admin was deactivated.
    pub async fn authenticate(&self, token: &str) -> Result<Admin, AppError> {
        let claims = self.signer.verify(token, Utc::now()).map_err(|e| {
            warn!(error = %e, "Token verification failed");
            invalid_token()
        })?;

        let admin: Admin = self
            .repository
            .get(Collection::Admins, &claims.admin_id)
            .await?
            .ok_or_else(invalid_token)?
            .decode()?;

        if !admin.is_active {
            return Err(AppError::unauthorized(
                "Admin account deactivated",
                Value::Null,
            ));
        }

        Ok(admin)
    }

    /// Creates the first super admin. Does nothing once any admin exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn setup(&self, email: &str, password: &str, name: &str) -> Result<SetupOutcome, AppError> {
        if self.repository.count(Collection::Admins).await? > 0 {
            info!("Admin setup skipped: an admin already exists");
            return Ok(SetupOutcome::AlreadyExists);
        }

        let admin = self
            .store_admin(
                NewAdmin {
                    email: email.to_string(),
                    password: password.to_string(),
                    name: name.to_string(),
                    role: AdminRole::SuperAdmin,
                },
                None,
            )
            .await?;

        info!(admin_id = %admin.id, "Initial super admin created");
        Ok(SetupOutcome::Created(admin))
    }

    /// Creates an admin account on behalf of `creator`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless `creator` is a super admin.
    /// Returns [`AppError::Validation`] if the email is already registered.
    pub async fn create_account(&self, creator: &Admin, new_admin: NewAdmin) -> Result<Admin, AppError> {
        if creator.role != AdminRole::SuperAdmin {
            return Err(AppError::forbidden(
                "Only super admins can create admin accounts",
                Value::Null,
            ));
        }

        let admin = self.register(new_admin, Some(creator.id.clone())).await?;

        info!(admin_id = %admin.id, created_by = %creator.id, "Admin account created");
        Ok(admin)
    }

    /// Creates an admin account without an acting admin (operator tooling).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email is already registered.
    pub async fn register(&self, new_admin: NewAdmin, created_by: Option<String>) -> Result<Admin, AppError> {
        let email = normalize_email(&new_admin.email);
        let existing = self
            .repository
            .query(Collection::Admins, Query::new().filter("email", email.as_str()).limit(1))
            .await?;

        if !existing.is_empty() {
            return Err(AppError::bad_request(
                "Admin with this email already exists",
                json!({"email": email}),
            ));
        }

        self.store_admin(new_admin, created_by).await
    }

    /// All admin accounts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_accounts(&self) -> Result<Vec<Admin>, AppError> {
        self.repository
            .query(
                Collection::Admins,
                Query::new().order_by("createdAt", Direction::Asc),
            )
            .await?
            .into_iter()
            .map(|d| d.decode())
            .collect()
    }

    /// Deactivates the admin with `email`. Existing tokens stop working on
    /// their next request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no admin has this email.
    pub async fn deactivate(&self, email: &str) -> Result<Admin, AppError> {
        let email = normalize_email(email);
        let doc = self
            .repository
            .query(Collection::Admins, Query::new().filter("email", email.as_str()).limit(1))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::not_found("Admin not found", json!({"email": email})))?;

        let mut patch = Fields::new();
        patch.insert("isActive".to_string(), Value::Bool(false));
        patch.insert("updatedAt".to_string(), Value::from(Timestamp::now().to_string()));

        warn!(admin_id = %doc.id, "Deactivating admin");

        self.repository
            .update(Collection::Admins, &doc.id, patch)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found", json!({"email": email})))?
            .decode()
    }

    async fn store_admin(&self, new_admin: NewAdmin, created_by: Option<String>) -> Result<Admin, AppError> {
        let now = Timestamp::now();
        let admin = Admin {
            id: String::new(),
            email: normalize_email(&new_admin.email),
            password_hash: hash_password(&new_admin.password).map_err(|e| {
                AppError::internal(format!("Failed to hash password: {e}"), Value::Null)
            })?,
            name: new_admin.name,
            role: new_admin.role,
            is_active: true,
            created_at: now,
            updated_at: Some(now),
            created_by,
        };

        self.repository
            .add(Collection::Admins, to_fields(&admin)?)
            .await?
            .decode()
    }
}
