//! Application context shared by every view: theme, admin session and routes.
//!
//! Created once at the application root of a Rust client and passed
//! explicitly to the views that need it. The server has no such root: it
//! reads the theme from a cookie and the user from the bearer token.
//!
//! Handles are cheap to clone and all clones observe the same value.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::domain::AuthUser;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// Current theme plus setter.
#[derive(Debug, Clone, Default)]
pub struct ThemeHandle(Arc<RwLock<Theme>>);

impl ThemeHandle {
    pub fn new(theme: Theme) -> Self {
        Self(Arc::new(RwLock::new(theme)))
    }

    pub fn get(&self) -> Theme {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, theme: Theme) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = theme;
    }

    /// Flip the theme and return the new value.
    pub fn toggle(&self) -> Theme {
        let mut guard = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *guard = guard.toggle();
        *guard
    }
}

/// Signed-in admin, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle(Arc<RwLock<Option<AuthUser>>>);

impl SessionHandle {
    pub fn current(&self) -> Option<AuthUser> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, user: Option<AuthUser>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    pub fn is_signed_in(&self) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Application-wide context.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    pub theme: ThemeHandle,
    pub session: SessionHandle,
}

impl AppContext {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme: ThemeHandle::new(theme),
            session: SessionHandle::default(),
        }
    }
}

/// Navigable sections of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", content = "id", rename_all = "kebab-case")]
pub enum Route {
    Landing,
    BlogArchive,
    BlogDetail(String),
    Admin,
}

impl Route {
    /// Resolve a request path. Only the id segment is significant; the query
    /// string is ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(Route::Landing),
            ["blog"] => Some(Route::BlogArchive),
            ["blog", id] => Some(Route::BlogDetail((*id).to_string())),
            ["admin"] => Some(Route::Admin),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::BlogArchive => "/blog".to_string(),
            Route::BlogDetail(id) => format!("/blog/{id}"),
            Route::Admin => "/admin".to_string(),
        }
    }

    /// Short name used by the page shell.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Landing => "landing",
            Route::BlogArchive => "blog-archive",
            Route::BlogDetail(_) => "blog-detail",
            Route::Admin => "admin",
        }
    }
}
