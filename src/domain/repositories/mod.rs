//! Repository trait definitions for the domain layer.
//!
//! The document store is abstracted behind [`DocumentRepository`]; concrete
//! implementations live in `crate::infrastructure::persistence` and a
//! `mockall` mock is generated for unit tests.

pub mod document_repository;

pub use document_repository::DocumentRepository;

#[cfg(test)]
pub use document_repository::MockDocumentRepository;
