/// Repository errors for domain layer.
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    /// A write (create, update, delete) did not happen.
    #[error("repository.persistence")]
    Persistence,
    /// A read could not be served.
    #[error("repository.database_error")]
    DatabaseError,
}

/// Object store errors for domain layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("storage.write")]
    Write,
    #[error("storage.delete")]
    Delete,
    /// Raised by object store adapters when the target object does not exist.
    #[error("storage.not_found")]
    NotFound,
}
