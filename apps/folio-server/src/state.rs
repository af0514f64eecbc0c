//! Application state - shared across all handlers.

use std::net::IpAddr;
use std::sync::Arc;

use folio_core::PostRepository;
use folio_core::ports::{
    FormRelay, IdentityProvider, ObjectStorage, PasswordService, PostStore, RateLimiter,
    TokenService,
};
use folio_infra::{
    Argon2PasswordService, CredentialIdentityProvider, InMemoryPostStore, InMemoryRateLimiter,
    JwtTokenService, Web3FormsRelay,
};

#[cfg(feature = "postgres")]
use folio_infra::{PostgresPostStore, connect};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repo: PostRepository,
    pub identity: Arc<dyn IdentityProvider>,
    pub tokens: Arc<dyn TokenService>,
    pub storage: Arc<dyn ObjectStorage>,
    pub forms: Arc<dyn FormRelay>,
    pub form_limiter: Arc<dyn RateLimiter>,
    pub trusted_proxies: Arc<[IpAddr]>,
    pub preview_chars: usize,
    /// Which post store is live, reported by the health check.
    pub store_kind: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig, storage: Arc<dyn ObjectStorage>) -> Self {
        let (store, store_kind) = Self::post_store(config).await;

        let argon2 = Argon2PasswordService::new();
        if let Some(Err(e)) = config
            .admin
            .as_ref()
            .map(|admin| argon2.parse_stored(&admin.password_hash))
        {
            tracing::error!(error = %e, "Admin sign-in will fail until the hash is fixed");
        }
        let passwords: Arc<dyn PasswordService> = Arc::new(argon2);
        let identity = CredentialIdentityProvider::new(config.admin.iter().cloned().collect(), passwords)
            .with_allowed_domains(config.allowed_domains.clone());

        tracing::info!(store = store_kind, "Application state initialized");

        Self {
            repo: PostRepository::new(store),
            identity: Arc::new(identity),
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            storage,
            forms: Arc::new(Web3FormsRelay::new(config.forms.clone())),
            form_limiter: Arc::new(InMemoryRateLimiter::new(config.form_rate_limit.clone())),
            trusted_proxies: config.trusted_proxies.clone().into(),
            preview_chars: config.preview_chars,
            store_kind,
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_store(config: &AppConfig) -> (Arc<dyn PostStore>, &'static str) {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryPostStore::new()), "memory");
        };

        match connect(db_config).await {
            Ok(conn) => (Arc::new(PostgresPostStore::new(conn)), "postgres"),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (Arc::new(InMemoryPostStore::new()), "memory")
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_store(_config: &AppConfig) -> (Arc<dyn PostStore>, &'static str) {
        tracing::info!("Running without postgres feature - using in-memory post store");
        (Arc::new(InMemoryPostStore::new()), "memory")
    }
}
