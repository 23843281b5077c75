//! Document identifier generation and short-code normalization.
//!
//! Document ids mirror the shape of hosted document stores: 20 URL-safe
//! characters drawn from the OS random source.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::Value;

/// Random bytes before base64 encoding (15 bytes -> 20 characters).
const ID_LENGTH_BYTES: usize = 15;

/// Generates a random document identifier.
///
/// # Panics
///
/// Panics if the system random number generator fails.
pub fn generate_document_id() -> String {
    let mut buffer = [0u8; ID_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Trims and uppercases a user supplied code.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if nothing is left after trimming.
pub fn normalize_code(code: &str) -> Result<String, AppError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(AppError::bad_request("Code is required", Value::Null));
    }

    Ok(code.to_uppercase())
}
