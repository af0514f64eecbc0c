//! Credential-based identity provider for the single admin surface.

use std::sync::Arc;

use async_trait::async_trait;

use folio_core::domain::AuthUser;
use folio_core::ports::{AuthError, Credentials, IdentityProvider, PasswordService};

/// An account allowed into the admin surface.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Signs admins in against configured accounts.
///
/// When `allowed_domains` is non-empty, emails outside those domains are
/// refused with [`AuthError::UnauthorizedDomain`] before any password check.
pub struct CredentialIdentityProvider {
    accounts: Vec<AdminAccount>,
    allowed_domains: Vec<String>,
    passwords: Arc<dyn PasswordService>,
}

impl CredentialIdentityProvider {
    pub fn new(accounts: Vec<AdminAccount>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            accounts,
            allowed_domains: Vec::new(),
            passwords,
        }
    }

    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = domains
            .into_iter()
            .map(|d| d.trim().trim_start_matches('@').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        self
    }

    fn domain_allowed(&self, email: &str) -> bool {
        if self.allowed_domains.is_empty() {
            return true;
        }
        email
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_ascii_lowercase())
            .is_some_and(|domain| self.allowed_domains.contains(&domain))
    }
}

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl IdentityProvider for CredentialIdentityProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthUser, AuthError> {
        let email = credentials.email.trim();
        if email.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::Rejected(
                "Email and password are required".to_string(),
            ));
        }

        let masked = mask_email(email);
        if !self.domain_allowed(email) {
            tracing::warn!(user_email = %masked, "Sign in from unauthorized domain");
            return Err(AuthError::UnauthorizedDomain);
        }

        let account = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| {
                tracing::debug!(user_email = %masked, "Unknown admin account");
                AuthError::Rejected("Invalid credentials".to_string())
            })?;

        if !self
            .passwords
            .verify(&credentials.password, &account.password_hash)?
        {
            tracing::warn!(user_email = %masked, "Wrong admin password");
            return Err(AuthError::Rejected("Invalid credentials".to_string()));
        }

        Ok(AuthUser {
            uid: account.uid.clone(),
            display_name: account.display_name.clone(),
            email: Some(account.email.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Argon2PasswordService;

    fn provider() -> CredentialIdentityProvider {
        let passwords = Arc::new(Argon2PasswordService::new());
        let account = AdminAccount {
            uid: "admin".to_string(),
            email: "ada@example.com".to_string(),
            display_name: Some("Ada".to_string()),
            password_hash: passwords.hash("s3cret-pass").unwrap(),
        };
        CredentialIdentityProvider::new(vec![account], passwords)
            .with_allowed_domains(vec!["@Example.com".to_string()])
    }

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let user = provider()
            .sign_in(&creds("ADA@example.com", "s3cret-pass"))
            .await
            .unwrap();
        assert_eq!(user.uid, "admin");
        assert_eq!(user.author_name(), "Ada");
    }

    #[tokio::test]
    async fn test_unauthorized_domain_is_classified() {
        let err = provider()
            .sign_in(&creds("mallory@evil.test", "s3cret-pass"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::UnauthorizedDomain);
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let err = provider()
            .sign_in(&creds("ada@example.com", "guess"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::Rejected("Invalid credentials".to_string()));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ada@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("nobody"), "***");
    }
}
