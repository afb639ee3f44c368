//! Payments Domain
//!
//! Read-only listing of settled payments with filtering by course, lesson,
//! and payment method, ordered by payment date. Payments are written by
//! the billing side of the platform, never by this service.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{PaymentError, PaymentResult};
pub use models::{Payment, PaymentFilter, PaymentMethod, SortOrder};
pub use postgres::PgPaymentRepository;
pub use repository::{InMemoryPaymentRepository, PaymentRepository};
pub use service::PaymentService;
