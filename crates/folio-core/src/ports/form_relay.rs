//! Form relay port - the third-party form submission endpoint.

use async_trait::async_trait;

use crate::domain::FormSubmission;

/// Message shown after a successful contact or newsletter submission.
pub const FORM_SUCCESS_MESSAGE: &str = "Message sent successfully! We'll get back to you soon.";

/// Successful relay response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReceipt {
    pub message: String,
}

#[async_trait]
pub trait FormRelay: Send + Sync {
    /// Deliver a submission. The relay adds its own access key.
    async fn submit(&self, submission: FormSubmission) -> Result<FormReceipt, FormError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Form relay unreachable: {0}")]
    Transport(String),

    #[error("Form relay rejected the submission: {0}")]
    Rejected(String),
}

impl FormError {
    /// The relay's reason is only logged, never shown.
    pub fn user_message(&self) -> &'static str {
        "Failed to send message. Please try again later."
    }
}
