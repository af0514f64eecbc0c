//! Single post page with its session-local comment thread.

use crate::domain::{Comment, CommentThread, Post};
use crate::error::DomainError;
use crate::repository::PostRepository;

pub const POST_NOT_FOUND: &str = "Blog post not found.";
pub const POST_FETCH_FAILED: &str = "Failed to load blog post.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(Post),
    NotFound,
    Failed(String),
}

impl DetailState {
    /// Message shown in place of the post, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            DetailState::NotFound => Some(POST_NOT_FOUND),
            DetailState::Failed(message) => Some(message),
            DetailState::Loading | DetailState::Loaded(_) => None,
        }
    }
}

pub struct PostDetailView {
    repo: PostRepository,
    id: Option<String>,
    state: DetailState,
    comments: CommentThread,
}

impl PostDetailView {
    pub fn new(repo: PostRepository) -> Self {
        Self {
            repo,
            id: None,
            state: DetailState::Loading,
            comments: CommentThread::new(),
        }
    }

    /// Fetch the post for `id`. Switching to another id starts a fresh
    /// comment thread.
    pub async fn open(&mut self, id: &str) {
        if self.id.as_deref() != Some(id) {
            self.comments = CommentThread::new();
            self.id = Some(id.to_string());
        }

        self.state = DetailState::Loading;
        self.state = match self.repo.get_post(id).await {
            Ok(Some(post)) => DetailState::Loaded(post),
            Ok(None) => DetailState::NotFound,
            Err(e) => {
                tracing::error!(post_id = %id, error = %e, "Failed to fetch post");
                DetailState::Failed(POST_FETCH_FAILED.to_string())
            }
        };
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn post(&self) -> Option<&Post> {
        match &self.state {
            DetailState::Loaded(post) => Some(post),
            _ => None,
        }
    }

    pub fn add_comment(&mut self, name: &str, text: &str) -> Result<&Comment, DomainError> {
        self.comments.add(name, text)
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.comments()
    }
}
