//! Theme preference, kept in a cookie.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpRequest, HttpResponse};

use folio_core::Theme;
use folio_shared::dto::ThemeResponse;

pub const THEME_COOKIE: &str = "theme";

/// Theme stored on the request, light when absent or unreadable.
pub fn current_theme(req: &HttpRequest) -> Theme {
    req.cookie(THEME_COOKIE)
        .and_then(|c| c.value().parse().ok())
        .unwrap_or_default()
}

fn theme_response(theme: Theme) -> HttpResponse {
    let cookie = Cookie::build(THEME_COOKIE, theme.as_str())
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(365))
        .finish();

    HttpResponse::Ok().cookie(cookie).json(ThemeResponse {
        theme: theme.to_string(),
    })
}

/// GET /api/theme
pub async fn get_theme(req: HttpRequest) -> HttpResponse {
    theme_response(current_theme(&req))
}

/// POST /api/theme/toggle
pub async fn toggle_theme(req: HttpRequest) -> HttpResponse {
    let theme = current_theme(&req).toggle();
    tracing::debug!(theme = %theme, "Theme toggled");
    theme_response(theme)
}
