//! Admin password hashing.
//!
//! The admin's password lives in the environment as an argon2 PHC string
//! (`ADMIN_PASSWORD_HASH`). Operators produce it with
//! `folio-server hash-password`, which goes through [`PasswordService::hash`].

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use folio_core::ports::{AuthError, PasswordService};

/// Shortest admin password accepted when hashing.
pub const MIN_ADMIN_PASSWORD_CHARS: usize = 8;

/// Argon2id with default parameters.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configured admin hash, refusing anything that is not argon2.
    pub fn parse_stored<'h>(&self, hash: &'h str) -> Result<PasswordHash<'h>, AuthError> {
        let parsed = PasswordHash::new(hash.trim())
            .map_err(|e| AuthError::HashingError(format!("ADMIN_PASSWORD_HASH is not a PHC string: {e}")))?;
        if !parsed.algorithm.as_str().starts_with("argon2") {
            return Err(AuthError::HashingError(format!(
                "ADMIN_PASSWORD_HASH uses {}, expected argon2",
                parsed.algorithm
            )));
        }
        Ok(parsed)
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.chars().count() < MIN_ADMIN_PASSWORD_CHARS {
            return Err(AuthError::Rejected(format!(
                "Admin password must be at least {MIN_ADMIN_PASSWORD_CHARS} characters"
            )));
        }
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let stored = self.parse_stored(hash)?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &stored)
            .is_ok())
    }
}
