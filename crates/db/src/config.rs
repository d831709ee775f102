//! Environment-based configuration for the persistence layer.
//!
//! Recognized variables:
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DB_MAX_CONNECTIONS`: pool size (default: 5)

use eyre::{Result, WrapErr};
use std::env;

#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL database connection string
    pub database_url: String,

    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl DbConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .wrap_err("Invalid DB_MAX_CONNECTIONS value")?;

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}
