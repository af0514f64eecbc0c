//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as listed in the feed, with a plain-text preview of its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub preview: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A full post, HTML content included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetail {
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Feed response. `categories` is computed over the whole feed, `posts`
/// only holds the posts matching `category`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostListResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub categories: Vec<CategoryCount>,
    pub posts: Vec<PostSummary>,
}

/// Create/edit form as submitted by the admin editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFormRequest {
    pub title: String,
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    /// Comma separated.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Error reported by a client-side sign-in popup, e.g. `auth/popup-blocked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Sign-in request: either credentials or the provider's failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignInRequest {
    Credentials { email: String, password: String },
    Failed { provider_error: ProviderError },
}

/// The signed-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Name stamped on posts this admin publishes.
    pub author: String,
}

/// Response containing the admin session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResultResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_request_variants() {
        let credentials: SignInRequest =
            serde_json::from_str(r#"{"email":"a@b.c","password":"pw"}"#).unwrap();
        assert!(matches!(credentials, SignInRequest::Credentials { .. }));

        let failed: SignInRequest =
            serde_json::from_str(r#"{"provider_error":{"code":"auth/popup-blocked"}}"#).unwrap();
        assert_eq!(
            failed,
            SignInRequest::Failed {
                provider_error: ProviderError {
                    code: "auth/popup-blocked".to_string(),
                    message: None,
                }
            }
        );
    }

    #[test]
    fn test_post_form_defaults() {
        let form: PostFormRequest =
            serde_json::from_str(r#"{"title":"t","excerpt":"e","category":"c"}"#).unwrap();
        assert_eq!(form.content, "");
        assert_eq!(form.tags, "");
        assert_eq!(form.date, None);
    }
}
