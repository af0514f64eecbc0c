//! Application configuration loaded from environment variables.

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

use folio_core::domain::DEFAULT_PREVIEW_CHARS;
use folio_infra::auth::AdminAccount;
use folio_infra::{DatabaseConfig, JwtConfig, RateLimitConfig, Web3FormsConfig};

/// Where editor images are written and how they are addressed.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Either an absolute URL (served elsewhere) or a path served by this
    /// server, e.g. `/uploads`.
    pub public_url: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub admin: Option<AdminAccount>,
    pub allowed_domains: Vec<String>,
    pub uploads: UploadConfig,
    pub forms: Web3FormsConfig,
    pub form_rate_limit: RateLimitConfig,
    /// Reverse proxies whose `X-Forwarded-For` is believed when keying the
    /// form rate limit. Empty means clients are keyed by peer address only.
    pub trusted_proxies: Vec<IpAddr>,
    pub preview_chars: usize,
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 20),
            min_connections: parsed("DB_MIN_CONNECTIONS", 2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            database,
            jwt: JwtConfig::from_env(),
            admin: Self::admin_account(),
            allowed_domains: env::var("AUTH_ALLOWED_DOMAINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            uploads: UploadConfig {
                dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./uploads")),
                public_url: env::var("UPLOAD_PUBLIC_URL").unwrap_or_else(|_| "/uploads".to_string()),
            },
            forms: Web3FormsConfig::from_env(),
            form_rate_limit: RateLimitConfig {
                per_minute: parsed("FORM_RATE_LIMIT_PER_MINUTE", 5),
            },
            trusted_proxies: env::var("TRUSTED_PROXIES")
                .map(|v| parse_addrs(&v))
                .unwrap_or_default(),
            preview_chars: parsed("PREVIEW_MAX_CHARS", DEFAULT_PREVIEW_CHARS),
        }
    }

    /// The single admin account. Both `ADMIN_EMAIL` and `ADMIN_PASSWORD_HASH`
    /// must be set, otherwise nobody can sign in.
    fn admin_account() -> Option<AdminAccount> {
        let email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty());
        let hash = env::var("ADMIN_PASSWORD_HASH")
            .ok()
            .filter(|v| !v.trim().is_empty());

        match (email, hash) {
            (Some(email), Some(password_hash)) => Some(AdminAccount {
                uid: "admin".to_string(),
                email: email.trim().to_string(),
                display_name: env::var("ADMIN_DISPLAY_NAME")
                    .ok()
                    .filter(|v| !v.trim().is_empty()),
                password_hash,
            }),
            _ => {
                tracing::warn!(
                    "ADMIN_EMAIL or ADMIN_PASSWORD_HASH not set. Admin sign-in is disabled."
                );
                None
            }
        }
    }
}

/// Split a comma separated list, dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a comma separated list of IP addresses, skipping bad entries.
fn parse_addrs(value: &str) -> Vec<IpAddr> {
    parse_list(value)
        .into_iter()
        .filter_map(|entry| match entry.parse() {
            Ok(addr) => Some(addr),
            Err(_) => {
                tracing::warn!(entry = %entry, "Ignoring invalid TRUSTED_PROXIES entry");
                None
            }
        })
        .collect()
}
