//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod forms;
mod health;
mod posts;
mod shell;
mod theme;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use actix_files::Files;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::rate_limit::RateLimitMiddleware;
use crate::state::AppState;

/// Uploads served back by this process. SVG is excluded since it can carry script.
const SERVED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif"];

/// Largest accepted image upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(state: &AppState) -> impl Fn(&mut web::ServiceConfig) {
    let form_limiter = state.form_limiter.clone();
    let trusted_proxies = state.trusted_proxies.clone();
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .route("/posts", web::get().to(posts::list_posts))
                .route("/posts/{id}", web::get().to(posts::get_post))
                .route("/theme", web::get().to(theme::get_theme))
                .route("/theme/toggle", web::post().to(theme::toggle_theme))
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/sign-in", web::post().to(auth::sign_in))
                        .route("/me", web::get().to(auth::me)),
                )
                // Admin routes
                .service(
                    web::scope("/admin")
                        .route("/posts", web::post().to(admin::create_post))
                        .route("/posts/{id}", web::put().to(admin::update_post))
                        .route("/posts/{id}", web::delete().to(admin::delete_post))
                        .service(
                            web::resource("/uploads")
                                .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
                                .route(web::post().to(admin::upload_image)),
                        ),
                )
                // Rate-limited public forms
                .service(
                    web::scope("/forms")
                        .wrap(
                            RateLimitMiddleware::new(form_limiter.clone())
                                .trust_proxies(trusted_proxies.clone()),
                        )
                        .route("/contact", web::post().to(forms::contact))
                        .route("/newsletter", web::post().to(forms::newsletter)),
                ),
        );
    }
}

/// Serve uploaded images stored in `dir` under `public_path`.
pub fn configure_media(public_path: String, dir: PathBuf) -> impl Fn(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.service(
            Files::new(public_path.trim_end_matches('/'), &dir)
                .path_filter(|path, _| is_served_image(path))
                .default_handler(web::to(missing_upload)),
        );
    }
}

fn is_served_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SERVED_IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

async fn missing_upload(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("No upload at {}", req.path())))
}

/// Page shell fallback for non-API paths.
pub fn page_shell() -> actix_web::Route {
    web::to(shell::page_shell)
}
