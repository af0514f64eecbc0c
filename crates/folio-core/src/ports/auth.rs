//! Authentication ports: the sign-in provider and admin session tokens.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::AuthUser;

/// Credentials presented to the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Single-provider sign-in gating the admin surface.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign in and return the identity of the admin.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError>;
}

/// Claims carried by an admin session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub exp: i64,
}

impl From<SessionClaims> for AuthUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            uid: claims.uid,
            display_name: claims.display_name,
            email: claims.email,
        }
    }
}

/// Session token service; a session ends when its token expires.
pub trait TokenService: Send + Sync {
    /// Issue a session token for a signed-in user.
    fn generate_token(&self, user: &AuthUser) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Sign in cancelled by user")]
    Cancelled,

    #[error("Domain not authorized")]
    UnauthorizedDomain,

    #[error("Sign in popup blocked")]
    PopupBlocked,

    #[error("Sign in rejected: {0}")]
    Rejected(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}

impl AuthError {
    /// Classify an error code reported by the sign-in provider.
    pub fn from_provider_code(code: &str, message: Option<&str>) -> Self {
        match code {
            "auth/popup-closed-by-user" | "auth/cancelled-popup-request" => AuthError::Cancelled,
            "auth/unauthorized-domain" => AuthError::UnauthorizedDomain,
            "auth/popup-blocked" => AuthError::PopupBlocked,
            _ => AuthError::Rejected(
                message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or("Unknown error")
                    .to_string(),
            ),
        }
    }

    /// Message shown on the sign-in screen.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Cancelled => "Sign in was cancelled.".to_string(),
            AuthError::UnauthorizedDomain => {
                "This domain is not authorized. Please contact the administrator.".to_string()
            }
            AuthError::PopupBlocked => {
                "Popup was blocked. Please allow popups for this site.".to_string()
            }
            AuthError::Rejected(reason) => format!("Sign in failed: {reason}"),
            AuthError::TokenExpired => "Your session has expired. Please sign in again.".to_string(),
            AuthError::InvalidToken(_) | AuthError::MissingAuth => {
                "Please sign in to continue.".to_string()
            }
            AuthError::HashingError(_) => "Sign in failed: Unknown error".to_string(),
        }
    }
}
