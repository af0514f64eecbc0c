//! Admin authoring flow: sign-in gate, post listing, create/edit forms,
//! confirmed deletes and image embedding.
//!
//! This is client-side state. The HTTP admin endpoints validate the same
//! [`PostForm`] and report the same messages but call the repository directly.
//!
//! Precondition violations (signed out, no open form, invalid form) come back
//! as `DomainError`. Outcomes of the remote calls are reported through
//! [`AdminSession::notice`] and the state machine, the way the page shows them.

use std::sync::Arc;

use super::list::ListState;
use crate::context::AppContext;
use crate::domain::{AuthUser, Post, PostForm};
use crate::error::DomainError;
use crate::ports::{
    AuthError, Clock, Credentials, IdentityProvider, ObjectStorage, SystemClock, UploadFile,
    upload_path,
};
use crate::repository::PostRepository;

pub const ADMIN_FETCH_FAILED: &str = "Failed to fetch blog posts.";
pub const POST_PUBLISHED: &str = "Blog post published!";
pub const POST_PUBLISH_FAILED: &str = "Failed to publish blog post.";
pub const POST_UPDATED: &str = "Blog post updated!";
pub const POST_UPDATE_FAILED: &str = "Failed to update blog post.";
pub const POST_DELETE_FAILED: &str = "Failed to delete blog post.";
pub const IMAGE_UPLOAD_FAILED: &str = "Image upload failed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Listing,
    Editing { id: String, form: PostForm },
    Creating { form: PostForm },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminState {
    SignedOut,
    SignedIn { user: AuthUser, mode: EditorMode },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Error(m) => m,
        }
    }
}

pub struct AdminSession {
    ctx: AppContext,
    repo: PostRepository,
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn ObjectStorage>,
    clock: Arc<dyn Clock>,
    state: AdminState,
    posts: ListState,
    notice: Option<Notice>,
    pending_delete: Option<String>,
}

impl AdminSession {
    pub fn new(
        ctx: AppContext,
        repo: PostRepository,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            ctx,
            repo,
            identity,
            storage,
            clock: Arc::new(SystemClock),
            state: AdminState::SignedOut,
            posts: ListState::Loading,
            notice: None,
            pending_delete: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn posts(&self) -> &ListState {
        &self.posts
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, AdminState::SignedIn { .. })
    }

    fn mode_mut(&mut self) -> Result<&mut EditorMode, DomainError> {
        match &mut self.state {
            AdminState::SignedIn { mode, .. } => Ok(mode),
            AdminState::SignedOut => Err(DomainError::Unauthorized),
        }
    }

    /// Pick up a session that is already live in the app context.
    pub async fn restore(&mut self) {
        match self.ctx.session.current() {
            Some(user) => self.enter(user).await,
            None => self.leave(),
        }
    }

    async fn enter(&mut self, user: AuthUser) {
        self.ctx.session.set(Some(user.clone()));
        self.state = AdminState::SignedIn {
            user,
            mode: EditorMode::Listing,
        };
        self.refresh().await;
    }

    fn leave(&mut self) {
        self.ctx.session.set(None);
        self.state = AdminState::SignedOut;
        self.posts = ListState::Loading;
        self.pending_delete = None;
    }

    /// Sign in through the identity provider.
    pub async fn sign_in(&mut self, credentials: &Credentials) {
        self.notice = None;
        match self.identity.sign_in(credentials).await {
            Ok(user) => {
                tracing::info!(uid = %user.uid, "Admin signed in");
                self.enter(user).await;
            }
            Err(e) => self.sign_in_failed(e),
        }
    }

    /// Record a sign-in failure reported by the provider. The session stays
    /// signed out.
    pub fn sign_in_failed(&mut self, error: AuthError) {
        tracing::warn!(error = %error, "Sign in failed");
        self.leave();
        self.notice = Some(Notice::Error(error.user_message()));
    }

    pub fn sign_out(&mut self) {
        self.notice = None;
        self.leave();
    }

    /// The provider ended the session (expiry, revocation).
    pub fn session_ended(&mut self) {
        tracing::info!("Admin session ended");
        self.leave();
    }

    /// Re-fetch the post list.
    pub async fn refresh(&mut self) {
        if !self.is_signed_in() {
            return;
        }
        self.posts = ListState::Loading;
        self.posts = match self.repo.list_posts().await {
            Ok(posts) => ListState::Ready(posts),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch posts for admin");
                ListState::Failed(ADMIN_FETCH_FAILED.to_string())
            }
        };
    }

    fn listed(&self, id: &str) -> Option<&Post> {
        match &self.posts {
            ListState::Ready(posts) => posts.iter().find(|p| p.id == id),
            _ => None,
        }
    }

    /// Open a blank form, closing any other.
    pub fn begin_create(&mut self) -> Result<(), DomainError> {
        *self.mode_mut()? = EditorMode::Creating {
            form: PostForm::default(),
        };
        self.notice = None;
        Ok(())
    }

    /// Open the edit form for a listed post, closing any other.
    pub fn begin_edit(&mut self, id: &str) -> Result<(), DomainError> {
        if !self.is_signed_in() {
            return Err(DomainError::Unauthorized);
        }
        let form = self
            .listed(id)
            .map(PostForm::from_post)
            .ok_or_else(|| DomainError::Validation(format!("post {id} is not listed")))?;

        *self.mode_mut()? = EditorMode::Editing {
            id: id.to_string(),
            form,
        };
        self.notice = None;
        Ok(())
    }

    /// The open form, for field edits.
    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        match self.mode_mut().ok()? {
            EditorMode::Editing { form, .. } | EditorMode::Creating { form } => Some(form),
            EditorMode::Listing => None,
        }
    }

    /// Close the open form and go back to the refreshed listing.
    pub async fn cancel(&mut self) -> Result<(), DomainError> {
        *self.mode_mut()? = EditorMode::Listing;
        self.refresh().await;
        Ok(())
    }

    /// Validate and save the open form.
    ///
    /// On success the form closes and the listing is re-fetched; on a write
    /// failure the form stays open with an error notice.
    pub async fn submit(&mut self) -> Result<(), DomainError> {
        let (user, mode) = match &self.state {
            AdminState::SignedIn { user, mode } => (user.clone(), mode.clone()),
            AdminState::SignedOut => return Err(DomainError::Unauthorized),
        };

        let form = match &mode {
            EditorMode::Editing { form, .. } | EditorMode::Creating { form } => form.clone(),
            EditorMode::Listing => return Err(DomainError::NoOpenForm),
        };
        if let Err(e) = form.validate() {
            self.notice = Some(Notice::Error(e.to_string()));
            return Err(e);
        }

        let (result, success, failure) = match mode {
            EditorMode::Creating { .. } => (
                self.repo.create_post(form, user.author_name()).await.map(drop),
                POST_PUBLISHED,
                POST_PUBLISH_FAILED,
            ),
            EditorMode::Editing { id, .. } => (
                self.repo.update_post(&id, form).await,
                POST_UPDATED,
                POST_UPDATE_FAILED,
            ),
            EditorMode::Listing => return Err(DomainError::NoOpenForm),
        };

        match result {
            Ok(()) => {
                *self.mode_mut()? = EditorMode::Listing;
                self.notice = Some(Notice::Success(success.to_string()));
                self.refresh().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Saving post failed");
                self.notice = Some(Notice::Error(failure.to_string()));
            }
        }
        Ok(())
    }

    /// Upload an image and embed it in the open form's content at the
    /// character `cursor` (clamped to the end).
    ///
    /// Returns the stored URL, or `None` when the upload failed; a failed
    /// upload leaves the form as it was.
    pub async fn embed_upload(
        &mut self,
        cursor: usize,
        file: UploadFile,
    ) -> Result<Option<String>, DomainError> {
        if self.form_mut().is_none() {
            return Err(if self.is_signed_in() {
                DomainError::NoOpenForm
            } else {
                DomainError::Unauthorized
            });
        }

        let path = upload_path(&file.file_name, self.clock.now());
        let url = match self.storage.upload(&path, file).await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Image upload failed");
                self.notice = Some(Notice::Error(IMAGE_UPLOAD_FAILED.to_string()));
                return Ok(None);
            }
        };

        if let Some(form) = self.form_mut() {
            let at = form
                .content
                .char_indices()
                .nth(cursor)
                .map(|(i, _)| i)
                .unwrap_or(form.content.len());
            form.content.insert_str(at, &format!("<img src=\"{url}\">"));
        }
        Ok(Some(url))
    }

    /// First step of a delete: remember what to delete and wait for the
    /// user to confirm. Nothing is sent to the store yet.
    pub fn request_delete(&mut self, id: &str) -> Result<(), DomainError> {
        if !self.is_signed_in() {
            return Err(DomainError::Unauthorized);
        }
        self.pending_delete = Some(id.to_string());
        Ok(())
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the post awaiting confirmation, then refresh the listing.
    pub async fn confirm_delete(&mut self) -> Result<(), DomainError> {
        if !self.is_signed_in() {
            return Err(DomainError::Unauthorized);
        }
        let Some(id) = self.pending_delete.take() else {
            return Ok(());
        };

        match self.repo.delete_post(&id).await {
            Ok(()) => {
                if let Ok(mode) = self.mode_mut() {
                    if matches!(mode, EditorMode::Editing { id: open, .. } if *open == id) {
                        *mode = EditorMode::Listing;
                    }
                }
                self.refresh().await;
            }
            Err(e) => {
                tracing::error!(post_id = %id, error = %e, "Delete failed");
                self.notice = Some(Notice::Error(POST_DELETE_FAILED.to_string()));
            }
        }
        Ok(())
    }
}
