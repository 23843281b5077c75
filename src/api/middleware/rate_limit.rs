//! Rate limiting for the credential endpoints.

use axum::body::Body;
use axum::http::Response;
use axum::response::IntoResponse;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_governor::{
    GovernorError, GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::error::AppError;

const PER_SECOND: u64 = 1;
const BURST: u32 = 10;

/// Limits login and setup attempts per client IP taken from the socket peer
/// address.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests` in the
/// standard failure envelope, with the governor's `retry-after` headers.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(PER_SECOND)
        .burst_size(BURST)
        .finish()
        .expect("non-zero rate limit constants");

    GovernorLayer::new(Arc::new(governor_conf)).error_handler(rejection_response)
}

/// Same limits as [`layer`], keyed on `X-Forwarded-For` / `X-Real-Ip` /
/// `Forwarded` before falling back to the peer address. Only use behind a
/// proxy that overwrites these headers.
pub fn proxied_layer() -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, Body>
{
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(PER_SECOND)
        .burst_size(BURST)
        .finish()
        .expect("non-zero rate limit constants");

    GovernorLayer::new(Arc::new(governor_conf)).error_handler(rejection_response)
}

fn rejection_response(error: GovernorError) -> Response<Body> {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_time, "Rate limit exceeded");
            let mut response = AppError::too_many_requests(
                "Too many requests, please try again later",
                json!({ "retryAfterSeconds": wait_time }),
            )
            .into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            AppError::internal("Unable to determine client address", Value::Null).into_response()
        }
        GovernorError::Other { code, msg, headers } => {
            let mut response = AppError::internal(
                msg.unwrap_or_else(|| "Rate limiter failure".to_string()),
                Value::Null,
            )
            .into_response();
            *response.status_mut() = code;
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
    }
}
