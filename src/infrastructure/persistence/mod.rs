//! Document repository implementations.
//!
//! # Repositories
//!
//! - [`PgDocumentRepository`] - PostgreSQL JSONB storage
//! - [`MemoryDocumentRepository`] - In-process storage for tests and local runs

pub mod memory_document_repository;
pub mod pg_document_repository;

pub use memory_document_repository::MemoryDocumentRepository;
pub use pg_document_repository::PgDocumentRepository;
