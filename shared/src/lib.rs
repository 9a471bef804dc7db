//! Shared utilities and common types for the WorkWrap server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures and message keys
//! - Utility functions (email and code validation, address masking)
//! - API response wrappers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, MailConfig, MailProvider,
    ServerConfig,
};
pub use errors::{error_codes, message_keys, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus, ServiceHealth};
pub use utils::validation;
