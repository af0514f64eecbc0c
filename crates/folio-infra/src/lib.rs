//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`:
//! post stores, session tokens, the admin identity provider, image storage,
//! the form relay and the form rate limiter.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL post store via SeaORM
//!
//! Without `postgres` only the in-memory post store is available.

pub mod auth;
pub mod database;
pub mod forms;
pub mod rate_limit;
pub mod storage;
pub mod store;

pub use auth::{Argon2PasswordService, CredentialIdentityProvider, JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
pub use forms::{Web3FormsConfig, Web3FormsRelay};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
pub use storage::LocalObjectStorage;
pub use store::InMemoryPostStore;

#[cfg(feature = "postgres")]
pub use database::{PostgresPostStore, connect};
