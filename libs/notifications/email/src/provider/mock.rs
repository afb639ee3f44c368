//! In-memory provider for tests.

use super::EmailProvider;
use crate::models::{Email, SendResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Records sent messages instead of delivering them.
///
/// Failure can be injected globally with [`MockSmtpProvider::failing`] or per
/// recipient with [`MockSmtpProvider::fail_recipient`].
#[derive(Default, Clone)]
pub struct MockSmtpProvider {
    sent: Arc<Mutex<Vec<Email>>>,
    should_fail: bool,
    failing_recipients: Arc<Mutex<HashSet<String>>>,
}

impl MockSmtpProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that fails every send.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Fail sends to a specific recipient while others succeed.
    pub fn fail_recipient(&self, address: impl Into<String>) {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(address.into());
    }

    pub fn sent_emails(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn was_sent_to(&self, address: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.to == address)
    }
}

#[async_trait]
impl EmailProvider for MockSmtpProvider {
    async fn send(&self, email: &Email) -> eyre::Result<SendResult> {
        if self.should_fail {
            return Err(eyre::eyre!("mock send failure"));
        }
        if self.failing_recipients.lock().unwrap().contains(&email.to) {
            return Err(eyre::eyre!("mock send failure for {}", email.to));
        }

        self.sent.lock().unwrap().push(email.clone());

        Ok(SendResult {
            message_id: email.id.clone(),
        })
    }

    async fn health_check(&self) -> eyre::Result<bool> {
        Ok(!self.should_fail)
    }

    fn name(&self) -> &'static str {
        "mock_smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_sent_emails() {
        let provider = MockSmtpProvider::new();
        let email = Email::new("student@example.com", "Hello").with_text("body");

        provider.send(&email).await.unwrap();

        assert_eq!(provider.sent_count(), 1);
        assert!(provider.was_sent_to("student@example.com"));
    }

    #[tokio::test]
    async fn per_recipient_failure_leaves_others_working() {
        let provider = MockSmtpProvider::new();
        provider.fail_recipient("broken@example.com");

        let ok = Email::new("fine@example.com", "Hi").with_text("body");
        let bad = Email::new("broken@example.com", "Hi").with_text("body");

        assert!(provider.send(&ok).await.is_ok());
        assert!(provider.send(&bad).await.is_err());
        assert_eq!(provider.sent_count(), 1);
    }
}
