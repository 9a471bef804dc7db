//! Repository interfaces for credential persistence.

pub mod verification;

pub use verification::{InMemoryVerificationRepository, VerificationRepository};
