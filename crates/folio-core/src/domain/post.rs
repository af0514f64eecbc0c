use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tags::{join_tags, normalize_tags};
use crate::error::DomainError;

/// Post entity - a published blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A post as written to the store, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDocument {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub date: DateTime<Utc>,
    pub image: Option<String>,
}

impl PostDocument {
    pub fn with_id(self, id: impl Into<String>) -> Post {
        Post {
            id: id.into(),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            tags: self.tags,
            author: self.author,
            date: self.date,
            image: self.image,
        }
    }
}

/// Fields overwritten by an edit. `author` and `id` are never part of it;
/// `date` only when explicitly supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPatch {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl PostPatch {
    /// Apply the patch to an existing post in place.
    pub fn apply(self, post: &mut Post) {
        post.title = self.title;
        post.excerpt = self.excerpt;
        post.content = self.content;
        post.category = self.category;
        post.tags = self.tags;
        post.image = self.image;
        if let Some(date) = self.date {
            post.date = date;
        }
    }
}

/// The authoring form, shared by the create and edit flows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    /// Comma separated.
    #[serde(default)]
    pub tags: String,
    /// Image URL, blank when the post has none.
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl PostForm {
    /// Pre-fill an edit form from an existing post.
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            category: post.category.clone(),
            tags: join_tags(&post.tags),
            image: post.image.clone().unwrap_or_default(),
            date: None,
        }
    }

    /// Title, excerpt and category are required; content may be empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing: Vec<&str> = [
            ("title", &self.title),
            ("excerpt", &self.excerpt),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "{} must not be empty",
                missing.join(", ")
            )))
        }
    }

    fn image_url(&self) -> Option<String> {
        let image = self.image.trim();
        (!image.is_empty()).then(|| image.to_string())
    }

    /// Build the document for a new post, stamping `date` unless the form
    /// carries an explicit one.
    pub fn into_document(self, author: String, now: DateTime<Utc>) -> PostDocument {
        let image = self.image_url();
        PostDocument {
            tags: normalize_tags(&self.tags),
            date: self.date.unwrap_or(now),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            author,
            image,
        }
    }

    pub fn into_patch(self) -> PostPatch {
        let image = self.image_url();
        PostPatch {
            tags: normalize_tags(&self.tags),
            date: self.date,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            image,
        }
    }
}
