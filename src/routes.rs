//! Top-level router combining resource, session and admin routes.
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **CORS** - any origin, the browser front end is served elsewhere
//! - **Rate limiting** - per-IP token bucket on login and setup
//! - **Authentication** - bearer session token on admin account routes
//! - **Path normalization** - trailing slash handling

use crate::api::middleware::{auth, rate_limit, tracing};
use crate::api::routes::{protected_routes, resource_routes, session_routes};
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let session_router = if behind_proxy {
        session_routes().layer(rate_limit::proxied_layer())
    } else {
        session_routes().layer(rate_limit::layer())
    };

    let admin_router = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .merge(resource_routes())
        .merge(session_router)
        .merge(admin_router)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
