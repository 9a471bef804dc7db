//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - The credential store for verification codes
//! - Schema migrations

pub mod connection;
pub mod repositories;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use repositories::PgVerificationRepository;
