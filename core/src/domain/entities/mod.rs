//! Domain entities representing core business objects.

pub mod verification_record;

// Re-export commonly used types
pub use verification_record::{
    FailedAttempt, NewVerificationRecord, VerificationRecord, CODE_VALIDITY_MINUTES,
    LOCK_DURATION_MINUTES, MAX_FAILED_ATTEMPTS, SEND_COOLDOWN_SECONDS,
};
