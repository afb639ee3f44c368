//! Subscriptions Domain
//!
//! A subscription is a standing request for update emails about a course.
//! The HTTP surface lets users follow and unfollow courses; the
//! notification worker reads `list_by_course` to build the recipient set
//! fresh at job execution time.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{SubscriptionError, SubscriptionResult};
pub use models::{CreateSubscription, Subscription};
pub use postgres::PgSubscriptionRepository;
pub use repository::{InMemorySubscriptionRepository, SubscriptionRepository};
pub use service::SubscriptionService;
