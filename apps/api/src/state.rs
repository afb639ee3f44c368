//! Shared application state

use redis::aio::ConnectionManager;
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    pub redis: ConnectionManager,
}
