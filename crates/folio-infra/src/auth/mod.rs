//! Authentication implementations.

mod identity;
mod jwt;
mod password;

pub use identity::{AdminAccount, CredentialIdentityProvider};
pub use jwt::{JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
