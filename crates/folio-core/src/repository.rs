//! Post repository - the façade between the views and the document store.

use std::sync::Arc;

use crate::domain::{Post, PostForm};
use crate::error::{ContentError, RepoError};
use crate::ports::{Clock, PostStore, SystemClock};

/// Translates view intents into store calls.
///
/// Holds no cache: every call is a fresh round trip, so a view sees its own
/// writes only after it re-fetches.
#[derive(Clone)]
pub struct PostRepository {
    store: Arc<dyn PostStore>,
    clock: Arc<dyn Clock>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn PostStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// All posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ContentError> {
        let posts = self
            .store
            .list_newest_first()
            .await
            .map_err(ContentError::Fetch)?;
        tracing::debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    /// One post by id; `None` when the store has no such document.
    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, ContentError> {
        self.store.find_by_id(id).await.map_err(ContentError::Fetch)
    }

    /// Publish a new post and return its store-assigned id.
    pub async fn create_post(&self, form: PostForm, author: String) -> Result<String, ContentError> {
        let document = form.into_document(author, self.clock.now());
        let id = self
            .store
            .insert(document)
            .await
            .map_err(ContentError::Write)?;
        tracing::info!(post_id = %id, "Post published");
        Ok(id)
    }

    /// Overwrite an existing post. `date` only changes when the form sets it.
    pub async fn update_post(&self, id: &str, form: PostForm) -> Result<(), ContentError> {
        self.store
            .update(id, form.into_patch())
            .await
            .map_err(ContentError::Write)?;
        tracing::info!(post_id = %id, "Post updated");
        Ok(())
    }

    /// Hard delete. Deleting a missing post is not an error for the caller.
    pub async fn delete_post(&self, id: &str) -> Result<(), ContentError> {
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(post_id = %id, "Post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => {
                tracing::warn!(post_id = %id, "Delete of a missing post ignored");
                Ok(())
            }
            Err(e) => Err(ContentError::Write(e)),
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::{TimeZone, Utc};

    use super::testing::{form, repo};
    use super::*;

    #[tokio::test]
    async fn test_create_then_get_returns_normalized_fields() {
        let (repo, _) = repo();
        let id = repo
            .create_post(form("Hello", "mlops", " x, y ,, "), "Ada".to_string())
            .await
            .unwrap();

        let post = repo.get_post(&id).await.unwrap().expect("post exists");
        assert_eq!(post.id, id);
        assert_eq!(post.title, "Hello");
        assert_eq!(post.excerpt, "Hello excerpt");
        assert_eq!(post.content, "<p>Hello body</p>");
        assert_eq!(post.category, "mlops");
        assert_eq!(post.tags, vec!["x", "y"]);
        assert_eq!(post.author, "Ada");
        assert_eq!(post.image, None);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (repo, _) = repo();
        for title in ["first", "second", "third"] {
            repo.create_post(form(title, "ai", ""), "Ada".to_string())
                .await
                .unwrap();
        }

        let posts = repo.list_posts().await.unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
        assert!(posts.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[tokio::test]
    async fn test_later_date_is_listed_first() {
        let (repo, _) = repo();
        repo.create_post(form("old", "ai", ""), "Ada".to_string())
            .await
            .unwrap();
        let future = PostForm {
            date: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            ..form("new", "ai", "")
        };
        let id = repo.create_post(future, "Ada".to_string()).await.unwrap();

        let posts = repo.list_posts().await.unwrap();
        assert_eq!(posts[0].id, id);
    }

    #[tokio::test]
    async fn test_update_keeps_date_and_author() {
        let (repo, _) = repo();
        let id = repo
            .create_post(form("Hello", "ai", "x"), "Ada".to_string())
            .await
            .unwrap();
        let before = repo.get_post(&id).await.unwrap().unwrap();

        repo.update_post(&id, form("Edited", "mlops", "y, z"))
            .await
            .unwrap();

        let after = repo.get_post(&id).await.unwrap().unwrap();
        assert_eq!(after.title, "Edited");
        assert_eq!(after.category, "mlops");
        assert_eq!(after.tags, vec!["y", "z"]);
        assert_eq!(after.date, before.date);
        assert_eq!(after.author, "Ada");
    }

    #[tokio::test]
    async fn test_update_with_date_moves_post_to_front() {
        let (repo, _) = repo();
        let first = repo
            .create_post(form("First", "ai", ""), "Ada".to_string())
            .await
            .unwrap();
        let second = repo
            .create_post(form("Second", "ai", ""), "Ada".to_string())
            .await
            .unwrap();
        assert_eq!(repo.list_posts().await.unwrap()[0].id, second);

        let redated = Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0).unwrap();
        let edit = PostForm {
            date: Some(redated),
            ..form("First, revised", "ai", "")
        };
        repo.update_post(&first, edit).await.unwrap();

        let after = repo.get_post(&first).await.unwrap().unwrap();
        assert_eq!(after.date, redated);
        assert_eq!(after.author, "Ada");

        let posts = repo.list_posts().await.unwrap();
        assert_eq!(posts[0].id, first);
        assert_eq!(posts[1].id, second);
    }

    #[tokio::test]
    async fn test_update_of_missing_post_is_write_error() {
        let (repo, _) = repo();
        let err = repo
            .update_post("missing", form("x", "y", ""))
            .await
            .unwrap_err();
        assert!(err.is_write());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (repo, _) = repo();
        let id = repo
            .create_post(form("Hello", "ai", ""), "Ada".to_string())
            .await
            .unwrap();

        repo.delete_post(&id).await.unwrap();
        assert!(repo.get_post(&id).await.unwrap().is_none());

        // Second delete is a no-op for the caller.
        repo.delete_post(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_outage_is_fetch_error() {
        let (repo, store) = repo();
        store.offline.store(true, Ordering::SeqCst);

        assert!(repo.list_posts().await.unwrap_err().is_fetch());
        assert!(repo.get_post("any").await.unwrap_err().is_fetch());
        assert!(
            repo.create_post(form("x", "y", ""), "Ada".to_string())
                .await
                .unwrap_err()
                .is_write()
        );
    }
}
