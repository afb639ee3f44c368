//! Email provider abstraction.
//!
//! Delivery backends implement [`EmailProvider`]. The fan-out processor is
//! generic over the provider, so tests run against [`MockSmtpProvider`]
//! while deployments use [`SmtpProvider`].

pub mod mock;
pub mod smtp;

pub use mock::MockSmtpProvider;
pub use smtp::{SmtpConfig, SmtpProvider};

use crate::models::{Email, SendResult};
use async_trait::async_trait;

/// A backend capable of delivering email.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, email: &Email) -> eyre::Result<SendResult>;

    /// Check connectivity to the delivery backend.
    async fn health_check(&self) -> eyre::Result<bool>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}
