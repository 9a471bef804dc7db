//! PostgreSQL implementation of the VerificationRepository trait.
//!
//! Records live in the `email_verification_codes` table. Every time
//! comparison binds the `now` supplied by the caller instead of using the
//! database clock, so the service and the store agree on a single instant.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use ww_core::domain::entities::verification_record::{NewVerificationRecord, VerificationRecord};
use ww_core::errors::{DomainError, DomainResult};
use ww_core::repositories::VerificationRepository;

const SELECT_COLUMNS: &str =
    "id, email, code_hash, attempts, locked_until, created_at, expires_at";

/// PostgreSQL implementation of VerificationRepository
pub struct PgVerificationRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgVerificationRepository {
    /// Create a new PostgreSQL verification repository
    ///
    /// # Arguments
    /// * `pool` - PostgreSQL connection pool from SQLx
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationRecord entity
    fn row_to_record(row: &PgRow) -> DomainResult<VerificationRecord> {
        Ok(VerificationRecord {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            address: row.try_get("email").map_err(|e| column_error("email", e))?,
            code_hash: row
                .try_get("code_hash")
                .map_err(|e| column_error("code_hash", e))?,
            attempts: row
                .try_get("attempts")
                .map_err(|e| column_error("attempts", e))?,
            locked_until: row
                .try_get::<Option<DateTime<Utc>>, _>("locked_until")
                .map_err(|e| column_error("locked_until", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
        })
    }

    async fn fetch_latest(
        &self,
        address: &str,
        condition: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        let query = format!(
            "SELECT {} FROM email_verification_codes \
             WHERE email = $1 AND {} > $2 \
             ORDER BY created_at DESC \
             LIMIT 1",
            SELECT_COLUMNS, condition
        );

        let row = sqlx::query(&query)
            .bind(address)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("fetch latest verification code", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }
}

#[async_trait]
impl VerificationRepository for PgVerificationRepository {
    async fn insert(&self, record: NewVerificationRecord) -> DomainResult<Uuid> {
        let query = r#"
            INSERT INTO email_verification_codes (
                email, code_hash, attempts, created_at, expires_at
            ) VALUES ($1, $2, 0, $3, $4)
            RETURNING id
        "#;

        let id: Uuid = sqlx::query_scalar(query)
            .bind(&record.address)
            .bind(&record.code_hash)
            .bind(record.created_at)
            .bind(record.expires_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("insert verification code", e))?;

        debug!(record_id = %id, "Inserted verification code");
        Ok(id)
    }

    async fn latest_unexpired(
        &self,
        address: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        self.fetch_latest(address, "expires_at", now).await
    }

    async fn latest_locked(
        &self,
        address: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        self.fetch_latest(address, "locked_until", now).await
    }

    async fn count_since(&self, address: &str, since: DateTime<Utc>) -> DomainResult<i64> {
        let query = r#"
            SELECT COUNT(*)
            FROM email_verification_codes
            WHERE email = $1 AND created_at >= $2
        "#;

        sqlx::query_scalar(query)
            .bind(address)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| storage_error("count recent verification codes", e))
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<VerificationRecord>> {
        let query = format!(
            "SELECT {} FROM email_verification_codes WHERE id = $1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find verification code", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn set_attempts(
        &self,
        id: Uuid,
        expected_attempts: i32,
        attempts: i32,
        locked_until: Option<DateTime<Utc>>,
    ) -> DomainResult<bool> {
        let query = r#"
            UPDATE email_verification_codes
            SET attempts = $3, locked_until = $4
            WHERE id = $1 AND attempts = $2
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(expected_attempts)
            .bind(attempts)
            .bind(locked_until)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("update verification attempts", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM email_verification_codes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete verification code", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM email_verification_codes WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete expired verification codes", e))?;

        Ok(result.rows_affected())
    }
}

fn storage_error(operation: &str, e: sqlx::Error) -> DomainError {
    error!(operation = operation, error = %e, "Verification store query failed");
    DomainError::storage(format!("Failed to {}: {}", operation, e))
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to get {}: {}", column, e))
}
