//! Repository trait for collection-oriented document access.

use crate::domain::document::{Collection, Document, Fields, GuardedInsert, GuardedOutcome, Query};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface over the document store.
///
/// Every resource is a flat JSON document in a named [`Collection`]. The
/// store supports equality filters, single-field ordering and one atomic
/// compound write ([`insert_guarded`](DocumentRepository::insert_guarded)).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDocumentRepository`] - PostgreSQL JSONB implementation
/// - [`crate::infrastructure::persistence::MemoryDocumentRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_document.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Fetches a document by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, AppError>;

    /// Returns documents matching every filter of `query`.
    ///
    /// Without ordering, documents come back in id order. Documents lacking
    /// the ordering field sort last in either direction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn query(&self, collection: Collection, query: Query) -> Result<Vec<Document>, AppError>;

    /// Counts all documents in a collection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn count(&self, collection: Collection) -> Result<u64, AppError>;

    /// Stores a new document under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn add(&self, collection: Collection, fields: Fields) -> Result<Document, AppError>;

    /// Shallow-merges `patch` into an existing document.
    ///
    /// Returns `Ok(None)` when no document has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>, AppError>;

    /// Deletes a document. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool, AppError>;

    /// Inserts a document only if its parent exists and nothing matches the
    /// uniqueness filters, bumping the parent's counter in the same unit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors. Nothing is written in
    /// that case.
    async fn insert_guarded(&self, insert: GuardedInsert) -> Result<GuardedOutcome, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be reached.
    async fn ping(&self) -> Result<(), AppError>;
}
