//! Password hashing for admin accounts.
//!
//! Hashes are Argon2id PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`),
//! so parameters travel with each stored hash.

use argon2::Argon2;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

const SALT_BYTES: usize = 16;

/// Hashes a password with a fresh random salt.
///
/// # Panics
///
/// Panics if the system random number generator fails.
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let mut salt = [0u8; SALT_BYTES];
    getrandom::fill(&mut salt).expect("Failed to generate random bytes");

    let salt = SaltString::encode_b64(&salt)?;
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Verifies a password against a stored PHC hash.
///
/// Returns `false` for hashes that do not parse.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
