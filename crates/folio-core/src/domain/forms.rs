//! Contact and newsletter forms relayed to the form-submission service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;

/// Field map sent to the form relay, minus the access key the relay adds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSubmission {
    pub fields: Map<String, Value>,
}

impl FormSubmission {
    fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(name.to_string(), Value::String(value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), DomainError> {
    require("email", email)?;
    if !email.contains('@') {
        return Err(DomainError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("name", &self.name)?;
        require_email(&self.email)?;
        require("subject", &self.subject)?;
        require("message", &self.message)
    }

    pub fn into_submission(self) -> FormSubmission {
        FormSubmission::default()
            .field("name", self.name)
            .field("email", self.email)
            .field("subject", self.subject)
            .field("message", self.message)
            .field("h-captcha", "false")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSignup {
    pub email: String,
}

impl NewsletterSignup {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_email(&self.email)
    }

    pub fn into_submission(self) -> FormSubmission {
        let message = format!("New newsletter signup: {}", self.email);
        FormSubmission::default()
            .field("email", self.email)
            .field("subject", "Newsletter Signup")
            .field("message", message)
            .field("h-captcha", "false")
    }
}
