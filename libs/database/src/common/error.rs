use thiserror::Error;

/// Errors shared across database connectors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Configuration error: {0}")]
    Config(#[from] core_config::ConfigError),

    #[error("Connection failed after {attempts} attempts: {details}")]
    ConnectionExhausted { attempts: u32, details: String },
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
