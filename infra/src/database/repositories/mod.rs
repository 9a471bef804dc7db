//! PostgreSQL repository implementations

pub mod verification_repository;

pub use verification_repository::PgVerificationRepository;
