mod config;
mod connector;

pub use config::PostgresConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
    run_migrations,
};

// Re-export the connection type so downstream crates don't need a direct
// sea-orm dependency just to hold a pool handle.
pub use sea_orm::DatabaseConnection;
