//! Utility functions shared across layers.
//!
//! - [`id_generator`] - Document id generation and code normalization
//! - [`password`] - Argon2id password hashing
//! - [`session_token`] - HS256 JWT admin session tokens
//! - [`timestamp`] - Fixed-width timestamps for stored documents

pub mod id_generator;
pub mod password;
pub mod session_token;
pub mod timestamp;
