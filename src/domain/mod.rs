//! Domain layer: document model, entities, repository contract and report
//! aggregation.
//!
//! # Architecture
//!
//! - [`document`] - Collections, documents, queries and guarded inserts
//! - [`entities`] - Typed views of stored documents
//! - [`repositories`] - Data access trait definitions
//! - [`reports`] - Pure statistics over fetched documents
//!
//! The domain layer has no dependency on infrastructure or presentation.
//! Orchestration lives in [`crate::application::services`].

pub mod document;
pub mod entities;
pub mod reports;
pub mod repositories;
