//! Web3Forms relay for the contact and newsletter forms.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use folio_core::domain::FormSubmission;
use folio_core::ports::{FORM_SUCCESS_MESSAGE, FormError, FormReceipt, FormRelay};

pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone)]
pub struct Web3FormsConfig {
    pub endpoint: String,
    pub access_key: String,
}

impl Web3FormsConfig {
    pub fn from_env() -> Self {
        let access_key = std::env::var("WEB3FORMS_ACCESS_KEY").unwrap_or_default();
        if access_key.is_empty() {
            tracing::warn!("WEB3FORMS_ACCESS_KEY not set. Form submissions will be rejected.");
        }
        Self {
            endpoint: std::env::var("WEB3FORMS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            access_key,
        }
    }
}

/// Response envelope returned by the relay.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Posts JSON payloads (fields plus the fixed access key) to Web3Forms.
pub struct Web3FormsRelay {
    client: reqwest::Client,
    config: Web3FormsConfig,
}

impl Web3FormsRelay {
    pub fn new(config: Web3FormsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn payload(&self, submission: FormSubmission) -> Value {
        let mut fields = submission.fields;
        fields.insert(
            "access_key".to_string(),
            Value::String(self.config.access_key.clone()),
        );
        Value::Object(fields)
    }
}

#[async_trait]
impl FormRelay for Web3FormsRelay {
    async fn submit(&self, submission: FormSubmission) -> Result<FormReceipt, FormError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.payload(submission))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Form relay unreachable");
                FormError::Transport(e.to_string())
            })?;

        let status = response.status();
        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| FormError::Transport(e.to_string()))?;

        if status.is_success() && envelope.success {
            Ok(FormReceipt {
                message: FORM_SUCCESS_MESSAGE.to_string(),
            })
        } else {
            let reason = envelope
                .message
                .unwrap_or_else(|| format!("status {status}"));
            tracing::error!(%status, reason = %reason, "Form relay rejected submission");
            Err(FormError::Rejected(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::domain::NewsletterSignup;

    #[test]
    fn test_payload_adds_access_key() {
        let relay = Web3FormsRelay::new(Web3FormsConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: "key-123".to_string(),
        });
        let submission = NewsletterSignup {
            email: "ada@example.com".to_string(),
        }
        .into_submission();

        let payload = relay.payload(submission);
        assert_eq!(payload["access_key"], "key-123");
        assert_eq!(payload["email"], "ada@example.com");
        assert_eq!(payload["subject"], "Newsletter Signup");
    }

    #[test]
    fn test_envelope_parsing() {
        let ok: Envelope = serde_json::from_str(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert!(ok.success);

        let failed: Envelope = serde_json::from_str(r#"{"message":"Invalid access key"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.message.as_deref(), Some("Invalid access key"));
    }
}
