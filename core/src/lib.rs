//! # WorkWrap Core
//!
//! Core business logic for the email verification code lifecycle.
//! This crate contains the verification record entity, the repository
//! interface for credential storage, the rate/lockout guard and the
//! verification service that callers use to issue and verify codes.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    FailedAttempt, NewVerificationRecord, VerificationRecord, CODE_VALIDITY_MINUTES,
    LOCK_DURATION_MINUTES, MAX_FAILED_ATTEMPTS, SEND_COOLDOWN_SECONDS,
};
pub use errors::{DomainError, DomainResult, IssueFailure, VerifyFailure};
pub use repositories::{InMemoryVerificationRepository, VerificationRepository};
pub use services::{
    BcryptCodeHasher, Clock, CodeHasher, IssueOutcome, IssuedCode, MailDispatcher, ManualClock,
    RecordingMailDispatcher, SentMail, SystemClock, VerificationGuard, VerificationService,
    VerifiedCode, VerifyOutcome,
};
