//! Blog feed: the landing-page teaser and the chronological archive.

use serde::{Deserialize, Serialize};

use crate::context::Route;
use crate::domain::{DEFAULT_PREVIEW_CHARS, Post, content_preview};
use crate::repository::PostRepository;

pub const LIST_FETCH_FAILED: &str = "Failed to load blog posts.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Ready(Vec<Post>),
    Failed(String),
}

/// Category predicate over the fetched feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// `"all"` or an empty value selects everything.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(category) => CategoryFilter::Category(category.to_string()),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => post.category == *category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

pub struct PostListView {
    repo: PostRepository,
    state: ListState,
    filter: CategoryFilter,
    preview_chars: usize,
}

impl PostListView {
    pub fn new(repo: PostRepository) -> Self {
        Self {
            repo,
            state: ListState::Loading,
            filter: CategoryFilter::All,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Fetch the feed. A failure discards whatever was shown before.
    pub async fn load(&mut self) {
        self.state = ListState::Loading;
        self.state = match self.repo.list_posts().await {
            Ok(posts) => ListState::Ready(posts),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch posts");
                ListState::Failed(LIST_FETCH_FAILED.to_string())
            }
        };
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    fn posts(&self) -> &[Post] {
        match &self.state {
            ListState::Ready(posts) => posts,
            _ => &[],
        }
    }

    /// Changing the filter never re-fetches.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Posts passing the current filter, newest first.
    pub fn visible(&self) -> Vec<&Post> {
        self.posts()
            .iter()
            .filter(|post| self.filter.matches(post))
            .collect()
    }

    /// Distinct categories in feed order, with their post counts.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for post in self.posts() {
            match counts.iter_mut().find(|c| c.category == post.category) {
                Some(entry) => entry.count += 1,
                None => counts.push(CategoryCount {
                    category: post.category.clone(),
                    count: 1,
                }),
            }
        }
        counts
    }

    /// Archive hero: the newest post.
    pub fn featured(&self) -> Option<&Post> {
        self.posts().first()
    }

    /// Archive remainder after the featured post.
    pub fn rest(&self) -> &[Post] {
        self.posts().get(1..).unwrap_or_default()
    }

    pub fn preview(&self, post: &Post) -> String {
        content_preview(&post.content, self.preview_chars)
    }

    /// Route for a clicked post. The detail view fetches on its own.
    pub fn select(&self, id: &str) -> Option<Route> {
        self.posts()
            .iter()
            .any(|post| post.id == id)
            .then(|| Route::BlogDetail(id.to_string()))
    }
}
