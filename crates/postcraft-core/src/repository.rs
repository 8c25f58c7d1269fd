//! Saved output repository trait definition (port).
//!
//! Implemented by the infrastructure layer (postcraft-infra). The core
//! crate never depends on any specific storage technology.

use uuid::Uuid;

use postcraft_types::error::RepositoryError;
use postcraft_types::output::SavedOutput;

/// Persistence for saved outputs, keyed by generation id.
///
/// Records are immutable once stored: there is no update operation.
pub trait SavedOutputRepository: Send + Sync {
    /// Store a new record. An existing id is a `RepositoryError::Conflict`.
    fn save(
        &self,
        output: &SavedOutput,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All saved records, most recently saved first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<SavedOutput>, RepositoryError>> + Send;

    fn get(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<SavedOutput>, RepositoryError>> + Send;

    /// Delete a record. A missing id is a `RepositoryError::NotFound`.
    fn delete(&self, id: &Uuid) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
