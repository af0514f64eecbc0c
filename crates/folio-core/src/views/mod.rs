//! View models - one per page, each owning its request lifecycle.
//!
//! A view is driven through `&mut self`, so an in-flight fetch lives inside
//! the future borrowed from the view: dropping the view drops the fetch and
//! its result can never land on a view that is gone.

mod admin;
mod detail;
mod list;

pub use admin::{
    ADMIN_FETCH_FAILED, AdminSession, AdminState, EditorMode, IMAGE_UPLOAD_FAILED, Notice,
    POST_DELETE_FAILED, POST_PUBLISH_FAILED, POST_PUBLISHED, POST_UPDATE_FAILED, POST_UPDATED,
};
pub use detail::{DetailState, POST_FETCH_FAILED, POST_NOT_FOUND, PostDetailView};
pub use list::{CategoryCount, CategoryFilter, LIST_FETCH_FAILED, ListState, PostListView};
