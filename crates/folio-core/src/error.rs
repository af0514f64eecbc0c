//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Sign in required")]
    Unauthorized,

    #[error("Nothing to submit")]
    NoOpenForm,
}

/// Store-level errors reported by a [`PostStore`](crate::ports::PostStore).
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Document not found")]
    NotFound,

    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Errors surfaced by the post repository to the views.
///
/// "Not found" is deliberately absent: reads return `Option` and callers
/// check for existence themselves.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Fetch failed: {0}")]
    Fetch(#[source] RepoError),

    #[error("Write failed: {0}")]
    Write(#[source] RepoError),

    #[error("Upload failed: {0}")]
    Upload(String),
}

impl ContentError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, ContentError::Fetch(_))
    }

    pub fn is_write(&self) -> bool {
        matches!(self, ContentError::Write(_))
    }
}
