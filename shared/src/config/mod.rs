//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - PostgreSQL connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Mail delivery provider configuration
//! - `server` - HTTP server configuration
//! - `verification` - Verification code hashing configuration
//!
//! Every section loads from environment variables. Call `dotenvy::dotenv()`
//! before `AppConfig::from_env` to pick up a local `.env` file.

pub mod database;
pub mod environment;
pub mod mail;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Mail delivery configuration
    pub mail: MailConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            mail: MailConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    ///
    /// Numeric settings fall back to their defaults when malformed; a
    /// provider selection that cannot be honored is an error.
    pub fn from_env() -> Result<Self, String> {
        let environment = Environment::from_env();
        Ok(Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            mail: MailConfig::from_env(environment)?,
            verification: VerificationConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        })
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is missing or malformed.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_on_missing_variable() {
        let value: u32 = env_or("WW_TEST_SURELY_UNSET_VARIABLE", 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_default_config_uses_development_logging() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.mail.provider, MailProvider::Log);
    }
}
