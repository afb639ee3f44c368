//! Course update notification pipeline.
//!
//! When a course or lesson changes, the API enqueues a [`CourseUpdateJob`]
//! through [`QueueUpdateNotifier`]. A worker consumes the stream with
//! [`CourseUpdateProcessor`], which resolves the course's subscribers and
//! delivers one email per subscriber via an [`EmailProvider`].

pub mod job;
pub mod models;
pub mod notifier;
pub mod processor;
pub mod provider;
pub mod streams;

pub use job::CourseUpdateJob;
pub use models::{Email, SendResult};
pub use notifier::QueueUpdateNotifier;
pub use processor::CourseUpdateProcessor;
pub use provider::{EmailProvider, MockSmtpProvider, SmtpConfig, SmtpProvider};
pub use streams::CourseUpdateStream;
