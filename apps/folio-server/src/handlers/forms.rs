//! Contact and newsletter forms, relayed to Web3Forms.

use actix_web::{HttpResponse, web};

use folio_core::domain::{ContactForm, NewsletterSignup};
use folio_shared::dto::{ContactRequest, FormResultResponse, NewsletterRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/forms/contact
pub async fn contact(
    state: web::Data<AppState>,
    body: web::Json<ContactRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let form = ContactForm {
        name: request.name,
        email: request.email,
        subject: request.subject,
        message: request.message,
    };
    form.validate()?;

    let receipt = state.forms.submit(form.into_submission()).await?;
    tracing::info!("Contact message relayed");
    Ok(HttpResponse::Ok().json(FormResultResponse {
        message: receipt.message,
    }))
}

/// POST /api/forms/newsletter
pub async fn newsletter(
    state: web::Data<AppState>,
    body: web::Json<NewsletterRequest>,
) -> AppResult<HttpResponse> {
    let signup = NewsletterSignup {
        email: body.into_inner().email,
    };
    signup.validate()?;

    let receipt = state.forms.submit(signup.into_submission()).await?;
    tracing::info!("Newsletter signup relayed");
    Ok(HttpResponse::Ok().json(FormResultResponse {
        message: receipt.message,
    }))
}
