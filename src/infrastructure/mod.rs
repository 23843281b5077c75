//! Infrastructure layer for external integrations.
//!
//! Implements the domain's [`DocumentRepository`](crate::domain::repositories::DocumentRepository)
//! contract over PostgreSQL and over process memory.

pub mod persistence;
