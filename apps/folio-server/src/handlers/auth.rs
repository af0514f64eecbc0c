//! Admin sign-in handlers.

use actix_web::{HttpResponse, web};

use folio_core::domain::AuthUser;
use folio_core::ports::{AuthError, Credentials};
use folio_shared::dto::{AuthResponse, SignInRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: &AuthUser) -> UserResponse {
    UserResponse {
        uid: user.uid.clone(),
        display_name: user.display_name.clone(),
        email: user.email.clone(),
        author: user.author_name(),
    }
}

/// POST /api/auth/sign-in
///
/// Accepts credentials, or the error code a client-side sign-in popup
/// reported so it can be classified the same way as a server-side failure.
pub async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<SignInRequest>,
) -> AppResult<HttpResponse> {
    let user = match body.into_inner() {
        SignInRequest::Credentials { email, password } => {
            state
                .identity
                .sign_in(&Credentials { email, password })
                .await?
        }
        SignInRequest::Failed { provider_error } => {
            let error =
                AuthError::from_provider_code(&provider_error.code, provider_error.message.as_deref());
            tracing::warn!(code = %provider_error.code, error = %error, "Sign in failed on the client");
            return Err(error.into());
        }
    };

    let token = state.tokens.generate_token(&user)?;
    tracing::info!(uid = %user.uid, "Admin session issued");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(state.tokens.expiration_seconds()).unwrap_or_default(),
        user: user_response(&user),
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(user_response(&identity.user)))
}
