//! Rate and lockout policy checks
//!
//! The guard keeps no state of its own. Both checks are reads against the
//! credential store at call time.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::verification_record::SEND_COOLDOWN_SECONDS;
use crate::errors::DomainResult;
use crate::repositories::verification::VerificationRepository;

/// Earliest instant a new code may be issued after one created at `created_at`
pub fn next_issue_at(created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::seconds(SEND_COOLDOWN_SECONDS)
}

/// Per-address cooldown and lock checks
pub struct VerificationGuard<R: VerificationRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: VerificationRepository + ?Sized> VerificationGuard<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// True iff some record for `address` is locked past `now`
    pub async fn is_locked(&self, address: &str, now: DateTime<Utc>) -> DomainResult<bool> {
        Ok(self.repository.latest_locked(address, now).await?.is_some())
    }

    /// True iff no record for `address` was created within the cooldown window
    pub async fn can_issue(&self, address: &str, now: DateTime<Utc>) -> DomainResult<bool> {
        let since = now - Duration::seconds(SEND_COOLDOWN_SECONDS);
        Ok(self.repository.count_since(address, since).await? == 0)
    }
}

impl<R: VerificationRepository + ?Sized> Clone for VerificationGuard<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
