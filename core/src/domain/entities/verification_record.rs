//! Verification record entity for email-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How long an issued code can be verified (5 minutes)
pub const CODE_VALIDITY_MINUTES: i64 = 5;

/// Minimum interval between two issuances for the same address
pub const SEND_COOLDOWN_SECONDS: i64 = 60;

/// Failed attempts against one record before the address is locked
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// How long a lock lasts once triggered (15 minutes)
pub const LOCK_DURATION_MINUTES: i64 = 15;

/// One outstanding or historical code challenge for an address.
///
/// Only the hash of the code is ever held here. Records are mutated by
/// failed verifications (attempt counter, lock) and deleted on success or
/// by the expiry sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Identifier assigned by the store on creation
    pub id: Uuid,

    /// Recipient email address the code was sent to
    pub address: String,

    /// bcrypt hash of the 6-digit code
    #[serde(skip_serializing)]
    pub code_hash: String,

    /// Number of failed verification attempts against this record
    pub attempts: i32,

    /// Verification is refused for the address while `now < locked_until`
    pub locked_until: Option<DateTime<Utc>>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the record can no longer be verified
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// A record is usable only while `expires_at > now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether a lock on this record is still in force at `now`
    pub fn is_locked_at(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.map_or(false, |until| until > now)
    }

    /// Failed attempts left before the lock triggers
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_FAILED_ATTEMPTS - self.attempts).max(0)
    }

    /// The state this record moves to after one more failed attempt at `now`
    pub fn next_failure(&self, now: DateTime<Utc>) -> FailedAttempt {
        let attempts = self.attempts + 1;
        let locked_until = if attempts >= MAX_FAILED_ATTEMPTS {
            Some(now + Duration::minutes(LOCK_DURATION_MINUTES))
        } else {
            None
        };

        FailedAttempt {
            attempts,
            locked_until,
        }
    }
}

/// Values to persist after a failed verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailedAttempt {
    /// New attempt count
    pub attempts: i32,
    /// Set when this attempt reached the threshold
    pub locked_until: Option<DateTime<Utc>>,
}

impl FailedAttempt {
    /// Whether this attempt triggered the lock
    pub fn triggers_lock(&self) -> bool {
        self.locked_until.is_some()
    }
}

/// A record about to be inserted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVerificationRecord {
    pub address: String,
    pub code_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewVerificationRecord {
    /// Creates a record valid for `CODE_VALIDITY_MINUTES` from `now`
    ///
    /// # Arguments
    ///
    /// * `address` - The email address the code is bound to
    /// * `code_hash` - One-way hash of the generated code
    /// * `now` - Creation timestamp
    pub fn new(address: impl Into<String>, code_hash: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            address: address.into(),
            code_hash: code_hash.into(),
            created_at: now,
            expires_at: now + Duration::minutes(CODE_VALIDITY_MINUTES),
        }
    }

    /// Materializes the stored form of this record under `id`
    pub fn into_record(self, id: Uuid) -> VerificationRecord {
        VerificationRecord {
            id,
            address: self.address,
            code_hash: self.code_hash,
            attempts: 0,
            locked_until: None,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
