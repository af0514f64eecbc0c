//! # Folio Core
//!
//! The domain layer of the Folio blog.
//! Posts, forms and the view models that drive the public blog and the admin
//! authoring flow. All I/O goes through the traits in [`ports`].
//!
//! ## Who drives what
//!
//! `folio-server` builds a fresh [`views::PostListView`] or
//! [`views::PostDetailView`] per request and uses [`Route`] and [`Theme`] for
//! the page shell. Admin writes go straight to [`PostRepository`] since an
//! HTTP request carries no editor state between calls.
//!
//! [`views::AdminSession`] and [`AppContext`] hold state across user actions
//! (open form, pending delete, signed-in user, theme). They are meant for a
//! long-lived Rust client such as a WASM front end, not for the server.

pub mod context;
pub mod domain;
pub mod error;
pub mod ports;
pub mod repository;
pub mod views;

pub use context::{AppContext, Route, Theme};
pub use error::{ContentError, DomainError};
pub use repository::PostRepository;
