//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the verification core
//! depends on.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: PostgreSQL credential store using SQLx
//! - **Mail**: verification mail delivery (Resend HTTP API, logging provider)
//! - **Config**: environment loading
//!
//! ## Features
//!
//! - `postgres`: Enable the PostgreSQL credential store (default)
//! - `resend-mail`: Enable the Resend mail provider (default)

use std::sync::Arc;

// Re-export core types for convenience
pub use ww_core::errors::*;

/// Database module - PostgreSQL implementations using SQLx
#[cfg(feature = "postgres")]
pub mod database;

/// Mail module - verification mail providers
pub mod mail;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration loading for infrastructure services
    //!
    //! Handles:
    //! - `.env` file loading
    //! - Shared application configuration from the environment
    //! - Provider credential checks

    use ww_shared::config::{AppConfig, Environment, MailProvider};

    use crate::InfrastructureError;

    /// Load the application configuration from the environment
    ///
    /// The environment-specific file (e.g. `.env.production`) is loaded
    /// first, then `.env`. Variables already set in the process environment
    /// take precedence over both.
    pub fn load_config() -> Result<AppConfig, InfrastructureError> {
        dotenvy::from_filename(Environment::from_env().env_file()).ok();
        dotenvy::dotenv().ok();

        let config = AppConfig::from_env().map_err(InfrastructureError::Config)?;
        validate(&config)?;
        Ok(config)
    }

    /// Check that the selected providers have what they need to start
    pub fn validate(config: &AppConfig) -> Result<(), InfrastructureError> {
        if config.mail.provider == MailProvider::Resend {
            if config.mail.api_key.trim().is_empty() {
                return Err(InfrastructureError::Config(
                    "AUTH_RESEND_KEY environment variable is not set".to_string(),
                ));
            }
            if config.mail.from_address.trim().is_empty() {
                return Err(InfrastructureError::Config(
                    "AUTH_EMAIL_FROM environment variable is not set".to_string(),
                ));
            }
        }

        if !(4..=31).contains(&config.verification.hash_cost) {
            return Err(InfrastructureError::Config(format!(
                "CODE_HASH_COST must be between 4 and 31, got {}",
                config.verification.hash_cost
            )));
        }

        Ok(())
    }

}

/// Infrastructure service container
///
/// Holds the long-lived handles the HTTP layer injects into the
/// verification service.
#[cfg(feature = "postgres")]
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Database connection pool
    pub pool: database::DatabasePool,
    /// PostgreSQL credential store
    pub repository: Arc<database::PgVerificationRepository>,
    /// Configured mail provider
    pub dispatcher: Arc<dyn ww_core::services::MailDispatcher>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The database connection pool and schema migrations
/// - The PostgreSQL credential store
/// - The configured mail provider
#[cfg(feature = "postgres")]
pub async fn initialize(
    config: &ww_shared::config::AppConfig,
) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services");

    let pool = database::DatabasePool::new(config.database.clone()).await?;
    pool.run_migrations().await?;

    let repository = Arc::new(database::PgVerificationRepository::new(pool.get_pool().clone()));
    let dispatcher = mail::create_mail_dispatcher(&config.mail)?;

    tracing::info!(
        mail_provider = dispatcher.provider_name(),
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices {
        pool,
        repository,
        dispatcher,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[cfg(feature = "postgres")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[cfg(feature = "resend-mail")]
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail service error: {0}")]
    Mail(String),
}
