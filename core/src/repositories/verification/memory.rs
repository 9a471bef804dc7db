//! In-memory implementation of VerificationRepository for tests and local development

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_record::{NewVerificationRecord, VerificationRecord};
use crate::errors::{DomainError, DomainResult};

use super::r#trait::VerificationRepository;

/// In-memory verification repository
///
/// Records are kept in insertion order, so among records sharing a
/// `created_at` the later insertion counts as the most recent.
#[derive(Clone, Default)]
pub struct InMemoryVerificationRepository {
    records: Arc<RwLock<Vec<VerificationRecord>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryVerificationRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with a storage error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the repository holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// All stored records for an address, oldest first
    pub async fn records_for(&self, address: &str) -> Vec<VerificationRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.address == address)
            .cloned()
            .collect()
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::storage("in-memory store marked unavailable"));
        }
        Ok(())
    }

    async fn latest_matching<F>(&self, address: &str, predicate: F) -> Option<VerificationRecord>
    where
        F: Fn(&VerificationRecord) -> bool,
    {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.address == address && predicate(r))
            // max_by_key keeps the last of equal keys, i.e. the latest insertion
            .max_by_key(|r| r.created_at)
            .cloned()
    }
}

#[async_trait]
impl VerificationRepository for InMemoryVerificationRepository {
    async fn insert(&self, record: NewVerificationRecord) -> DomainResult<Uuid> {
        self.check_available()?;
        let id = Uuid::new_v4();
        self.records.write().await.push(record.into_record(id));
        Ok(id)
    }

    async fn latest_unexpired(
        &self,
        address: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        self.check_available()?;
        Ok(self.latest_matching(address, |r| r.expires_at > now).await)
    }

    async fn latest_locked(
        &self,
        address: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        self.check_available()?;
        Ok(self.latest_matching(address, |r| r.is_locked_at(now)).await)
    }

    async fn count_since(&self, address: &str, since: DateTime<Utc>) -> DomainResult<i64> {
        self.check_available()?;
        let count = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.address == address && r.created_at >= since)
            .count();
        Ok(count as i64)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<VerificationRecord>> {
        self.check_available()?;
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn set_attempts(
        &self,
        id: Uuid,
        expected_attempts: i32,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> DomainResult<bool> {
        self.check_available()?;
        let mut records = self.records.write().await;
        match records
            .iter_mut()
            .find(|r| r.id == id && r.attempts == expected_attempts)
        {
            Some(record) => {
                record.attempts = attempts;
                record.locked_until = locked_until;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.expires_at >= now);
        Ok((before - records.len()) as u64)
    }
}
