//! PostgreSQL connector and utilities
//!
//! Provides pool construction, connect-with-retry, health checks and shutdown.

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{close, connect_from_config_with_retry};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
