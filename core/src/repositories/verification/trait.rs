//! Credential store trait for verification record persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_record::{NewVerificationRecord, VerificationRecord};
use crate::errors::DomainResult;

/// Repository trait for `VerificationRecord` persistence operations
///
/// Every time comparison takes an explicit `now` so that all stores agree
/// with the service clock. Any operation fails with `DomainError::Storage`
/// when the backing store is unreachable or rejects the query.
///
/// # Security Considerations
/// - Only code hashes are stored, never plaintext codes
/// - Several live records may exist per address; callers only ever act on
///   the most recently created one
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Insert a new record and return the id assigned by the store
    ///
    /// Never deduplicates against existing records for the same address.
    async fn insert(&self, record: NewVerificationRecord) -> DomainResult<Uuid>;

    /// Most recently created record for `address` with `expires_at > now`
    async fn latest_unexpired(
        &self,
        address: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>>;

    /// Most recently created record for `address` with `locked_until > now`
    async fn latest_locked(
        &self,
        address: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>>;

    /// Number of records for `address` created at or after `since`
    async fn count_since(&self, address: &str, since: DateTime<Utc>) -> DomainResult<i64>;

    /// Find a record by id regardless of expiry
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<VerificationRecord>>;

    /// Atomically set `attempts` and `locked_until` on one record
    ///
    /// The update only applies while the stored attempt count still equals
    /// `expected_attempts`, so concurrent failures can never lose an
    /// increment.
    ///
    /// # Returns
    /// * `Ok(true)` - The record was updated
    /// * `Ok(false)` - The record is gone or its attempt count changed
    async fn set_attempts(
        &self,
        id: Uuid,
        expected_attempts: i32,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> DomainResult<bool>;

    /// Remove one record, returning whether it existed
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Remove every record with `expires_at < now`, across all addresses
    ///
    /// Idempotent. Returns the number of records removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64>;
}
