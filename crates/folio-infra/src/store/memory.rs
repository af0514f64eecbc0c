//! In-memory post store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use folio_core::domain::{Post, PostDocument, PostPatch};
use folio_core::error::RepoError;
use folio_core::ports::PostStore;

#[derive(Default)]
struct Collection {
    posts: HashMap<String, Post>,
    // Insertion order, used to keep listings stable for equal dates.
    order: Vec<String>,
}

/// Post collection held in a `HashMap` behind an async `RwLock`.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    collection: RwLock<Collection>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(Collection::default()),
        }
    }

    /// Store pre-seeded with existing posts, keeping their ids.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let mut collection = Collection::default();
        for post in posts {
            collection.order.push(post.id.clone());
            collection.posts.insert(post.id.clone(), post);
        }
        Self {
            collection: RwLock::new(collection),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn list_newest_first(&self) -> Result<Vec<Post>, RepoError> {
        let collection = self.collection.read().await;
        let mut posts: Vec<Post> = collection
            .order
            .iter()
            .filter_map(|id| collection.posts.get(id))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(posts)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        Ok(self.collection.read().await.posts.get(id).cloned())
    }

    async fn insert(&self, document: PostDocument) -> Result<String, RepoError> {
        let id = Uuid::new_v4().simple().to_string();
        let mut collection = self.collection.write().await;
        collection.order.push(id.clone());
        collection
            .posts
            .insert(id.clone(), document.with_id(id.clone()));
        tracing::debug!(post_id = %id, "Post inserted");
        Ok(id)
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<(), RepoError> {
        let mut collection = self.collection.write().await;
        let post = collection.posts.get_mut(id).ok_or(RepoError::NotFound)?;
        patch.apply(post);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let mut collection = self.collection.write().await;
        if collection.posts.remove(id).is_none() {
            return Err(RepoError::NotFound);
        }
        collection.order.retain(|existing| existing != id);
        Ok(())
    }
}
