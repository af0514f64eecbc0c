//! Domain entities and the pure helpers around them.

mod comment;
mod forms;
mod post;
mod preview;
mod tags;
mod user;

pub use comment::{Comment, CommentThread};
pub use forms::{ContactForm, FormSubmission, NewsletterSignup};
pub use post::{Post, PostDocument, PostForm, PostPatch};
pub use preview::{DEFAULT_PREVIEW_CHARS, content_preview};
pub use tags::{join_tags, normalize_tags};
pub use user::AuthUser;
