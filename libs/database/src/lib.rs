//! Database connectors for PostgreSQL (SeaORM) and Redis.
//!
//! Provides typed, env-loadable configuration and connection helpers with
//! retry/backoff for use during service startup.
//!
//! # Examples
//!
//! ## PostgreSQL
//!
//! ```ignore
//! use database::postgres;
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db).await?;
//! ```
//!
//! ## Redis
//!
//! ```ignore
//! use database::redis;
//!
//! let conn = redis::connect_from_config_with_retry(config, None).await?;
//! ```

pub mod common;
pub mod postgres;
pub mod redis;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
