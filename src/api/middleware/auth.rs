//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::Value;

use crate::{error::AppError, state::AppState};

/// Authenticates admin requests using the session token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature and expiry
/// 3. Re-read the admin document and check it is still active
/// 4. Store the [`Admin`](crate::domain::entities::Admin) in request
///    extensions for the handler
///
/// # Errors
///
/// Returns `401 Unauthorized` with:
/// - "Access token required" if the header is missing or not a bearer token
/// - "Invalid token" if the token is malformed, forged or expired
/// - "Admin account deactivated" if the account was switched off
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::unauthorized("Access token required", Value::Null))?;

    let admin = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(admin);

    Ok(next.run(req).await)
}
