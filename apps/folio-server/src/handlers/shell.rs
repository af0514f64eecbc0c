//! Page shell for the client-side routes.

use actix_web::{HttpRequest, HttpResponse, http::Method};
use askama::Template;

use folio_core::Route;

use super::theme::current_theme;
use crate::middleware::error::{AppError, AppResult};

#[derive(Template)]
#[template(path = "shell.html")]
struct ShellPage<'a> {
    theme: &'static str,
    route: &'static str,
    post_id: Option<&'a str>,
}

/// Fallback for every path outside `/api`: known routes get the shell,
/// anything else is a 404.
pub async fn page_shell(req: HttpRequest) -> AppResult<HttpResponse> {
    if req.method() != Method::GET {
        return Err(AppError::NotFound(format!("No route for {}", req.path())));
    }
    let route = Route::parse(req.path())
        .ok_or_else(|| AppError::NotFound(format!("No page at {}", req.path())))?;

    let page = ShellPage {
        theme: current_theme(&req).as_str(),
        route: route.name(),
        post_id: match &route {
            Route::BlogDetail(id) => Some(id.as_str()),
            _ => None,
        },
    };
    let html = page
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to render page shell: {e}")))?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
