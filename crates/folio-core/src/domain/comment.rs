//! Session-local comment threads on the post detail page.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub name: String,
    pub text: String,
}

/// Append-only list of comments, owned by a single detail view.
///
/// Nothing is persisted: the thread is dropped together with its view.
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
}

impl CommentThread {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a comment. Both name and text must be non-blank.
    pub fn add(&mut self, name: &str, text: &str) -> Result<&Comment, DomainError> {
        if name.trim().is_empty() || text.trim().is_empty() {
            return Err(DomainError::Validation(
                "name and comment text are required".to_string(),
            ));
        }

        self.comments.push(Comment {
            name: name.to_string(),
            text: text.to_string(),
        });
        Ok(&self.comments[self.comments.len() - 1])
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
