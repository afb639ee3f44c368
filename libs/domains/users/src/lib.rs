//! Users Domain
//!
//! Users are the platform's identities: course owners, subscribers, and the
//! staff actors that bypass ownership scoping. The crate also provides the
//! [`Actor`] request extractor that turns gateway-forwarded identity headers
//! into an explicit parameter threaded through every service call.

pub mod actor;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;

pub use error::{UserError, UserResult};
pub use models::{Actor, CreateUser, User};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
