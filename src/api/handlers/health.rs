//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;
use crate::utils::timestamp::Timestamp;

/// Reports whether the document store is reachable.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: store answered the ping
/// - **500 Internal Server Error**: store unreachable, `error` carries the cause
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "status": "OK",
///   "store": "Connected",
///   "timestamp": "2025-01-31T10:00:00.000000Z",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let ping = state.repository.ping().await;

    let mut response = HealthResponse {
        success: true,
        status: "OK".to_string(),
        store: "Connected".to_string(),
        timestamp: Timestamp::now().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        error: None,
    };

    match ping {
        Ok(()) => (StatusCode::OK, Json(response)),
        Err(e) => {
            error!(error = %e, "Health check failed");
            response.success = false;
            response.status = "ERROR".to_string();
            response.store = "Disconnected".to_string();
            response.error = Some(e.message().to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response))
        }
    }
}
