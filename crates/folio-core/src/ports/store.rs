use async_trait::async_trait;

use crate::domain::{Post, PostDocument, PostPatch};
use crate::error::RepoError;

/// Document store holding the post collection.
///
/// Implementations assign ids on insert and never reuse them.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, newest `date` first.
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a new document and return the id the store assigned.
    async fn insert(&self, document: PostDocument) -> Result<String, RepoError>;

    /// Overwrite an existing document. `RepoError::NotFound` if it is gone.
    async fn update(&self, id: &str, patch: PostPatch) -> Result<(), RepoError>;

    /// Remove a document. `RepoError::NotFound` if it did not exist.
    async fn delete(&self, id: &str) -> Result<(), RepoError>;
}
