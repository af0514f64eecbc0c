//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use folio_core::error::{ContentError, DomainError, RepoError};
use folio_core::ports::{AuthError, FormError, UploadError};
use folio_core::views::{IMAGE_UPLOAD_FAILED, POST_NOT_FOUND};
use folio_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
///
/// Details carried by `Unavailable` and `Upstream` are user-facing; the
/// underlying cause is logged where the error is built.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Authentication failed: {0}")]
    Auth(AuthError),

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Map a repository failure to the message the page would show.
    pub fn content(err: ContentError, message: &str) -> Self {
        match err {
            ContentError::Write(RepoError::NotFound) => AppError::NotFound(POST_NOT_FOUND.to_string()),
            other => {
                tracing::error!(error = %other, "Post store call failed");
                AppError::Unavailable(message.to_string())
            }
        }
    }
}

/// Stable code for each sign-in failure, so clients can branch on it.
fn auth_code(err: &AuthError) -> &'static str {
    match err {
        AuthError::Cancelled => "auth/popup-closed-by-user",
        AuthError::UnauthorizedDomain => "auth/unauthorized-domain",
        AuthError::PopupBlocked => "auth/popup-blocked",
        AuthError::Rejected(_) => "auth/rejected",
        AuthError::TokenExpired => "auth/token-expired",
        AuthError::InvalidToken(_) | AuthError::MissingAuth => "auth/unauthenticated",
        AuthError::HashingError(_) => "auth/internal",
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::UnauthorizedDomain) => StatusCode::FORBIDDEN,
            AppError::Auth(AuthError::HashingError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Auth(err) => {
                if let AuthError::HashingError(detail) = err {
                    tracing::error!("Password hashing failed: {}", detail);
                }
                ErrorResponse::new(status.as_u16(), "Authentication Failed")
                    .with_detail(err.user_message())
                    .with_code(auth_code(err))
            }
            AppError::RateLimited { retry_after_secs } => ErrorResponse::too_many_requests(
                format!("Rate limit exceeded. Try again in {retry_after_secs} seconds."),
            ),
            AppError::Upstream(detail) => ErrorResponse::bad_gateway(detail),
            AppError::Unavailable(detail) => {
                ErrorResponse::new(503, "Service Unavailable").with_detail(detail)
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        let mut response = HttpResponse::build(status);
        if let AppError::RateLimited { retry_after_secs } = self {
            response.insert_header(("Retry-After", retry_after_secs.to_string()));
        }
        response.json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::Unauthorized => AppError::Auth(AuthError::MissingAuth),
            DomainError::NoOpenForm => AppError::BadRequest("Nothing to submit".to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err)
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        tracing::error!(error = %err, "Form relay failed");
        AppError::Upstream(err.user_message().to_string())
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Empty => AppError::BadRequest("Upload body is empty".to_string()),
            other => {
                tracing::error!(error = %other, "Image upload failed");
                AppError::Upstream(IMAGE_UPLOAD_FAILED.to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
