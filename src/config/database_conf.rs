use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Load database configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DATABASE_URL: PostgreSQL connection string (required)
    /// - DATABASE_MAX_CONNECTIONS: pool size (defaults to 10)
    /// - DATABASE_CONNECT_TIMEOUT_SECS: connection timeout (defaults to 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading database configuration from environment variables");

        let url = env::var("DATABASE_URL").map_err(|_| {
            error!("DATABASE_URL environment variable not found");
            ConfigError::MissingEnvVar("DATABASE_URL".to_string())
        })?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| {
                warn!("DATABASE_MAX_CONNECTIONS not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|e| {
                error!("Invalid DATABASE_MAX_CONNECTIONS value: {}", e);
                ConfigError::InvalidEnvVar(format!("DATABASE_MAX_CONNECTIONS: {}", e))
            })?;

        let connection_timeout_secs = env::var("DATABASE_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|e| {
                error!("Invalid DATABASE_CONNECT_TIMEOUT_SECS value: {}", e);
                ConfigError::InvalidEnvVar(format!("DATABASE_CONNECT_TIMEOUT_SECS: {}", e))
            })?;

        debug!(
            "Database pool: max_connections={}, connect_timeout={}s",
            max_connections, connection_timeout_secs
        );

        Ok(DatabaseConfig {
            url,
            max_connections,
            connection_timeout_secs,
        })
    }
}
