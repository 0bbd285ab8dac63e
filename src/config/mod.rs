pub mod app_conf;
pub mod database_conf;
pub mod jwt_conf;

pub use database_conf::DatabaseConfig;
pub use jwt_conf::JwtConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment variable value: {0}")]
    InvalidEnvVar(String),
}
