//! Body of the `PATCH .../status` endpoints.

use serde::Deserialize;

/// `{ "status": "..." }`. The value is checked against the resource's own
/// status set by the service.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: String,
}
