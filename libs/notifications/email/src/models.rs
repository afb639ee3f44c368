//! Email message model shared by providers and the fan-out processor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An email message ready for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    /// Unique identifier for tracking the message through the pipeline.
    pub id: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub body_text: Option<String>,
    /// HTML body. Takes precedence over `body_text` when both are set.
    pub body_html: Option<String>,
    /// Sender address. Falls back to the provider default when unset.
    pub from: Option<String>,
}

impl Email {
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            to: to.into(),
            subject: subject.into(),
            body_text: None,
            body_html: None,
            from: None,
        }
    }

    pub fn with_text(mut self, body: impl Into<String>) -> Self {
        self.body_text = Some(body.into());
        self
    }

    pub fn with_html(mut self, body: impl Into<String>) -> Self {
        self.body_html = Some(body.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Result of a successful send.
#[derive(Debug, Clone)]
pub struct SendResult {
    /// Provider-assigned message identifier.
    pub message_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_bodies() {
        let email = Email::new("student@example.com", "Course updated")
            .with_text("New lesson available")
            .with_from("noreply@example.com");

        assert_eq!(email.to, "student@example.com");
        assert_eq!(email.subject, "Course updated");
        assert_eq!(email.body_text.as_deref(), Some("New lesson available"));
        assert!(email.body_html.is_none());
        assert_eq!(email.from.as_deref(), Some("noreply@example.com"));
    }
}
