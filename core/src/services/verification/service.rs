//! Main verification service implementation

use std::sync::Arc;
use tracing;

use ww_shared::validation::{is_valid_code_format, mask_email};

use crate::domain::entities::verification_record::{NewVerificationRecord, VerificationRecord};
use crate::errors::{DomainError, DomainResult, IssueFailure, VerifyFailure};
use crate::repositories::verification::VerificationRepository;

use super::clock::{Clock, SystemClock};
use super::generator::generate_code;
use super::guard::{next_issue_at, VerificationGuard};
use super::hasher::CodeHasher;
use super::traits::MailDispatcher;
use super::types::{IssueOutcome, IssuedCode, VerifiedCode, VerifyOutcome};

/// Attempts at persisting a failed verification before giving up on a
/// record that keeps changing underneath us
const MAX_ATTEMPT_UPDATE_TRIES: usize = 3;

/// Verification service for issuing and checking email verification codes
///
/// Holds no per-address state. Every call resolves state from the
/// credential store using the instant reported by the clock at its start.
pub struct VerificationService<R, M>
where
    R: VerificationRepository + ?Sized,
    M: MailDispatcher + ?Sized,
{
    /// Credential store
    repository: Arc<R>,
    /// Mail delivery for generated codes
    dispatcher: Arc<M>,
    /// One-way code hashing
    hasher: Arc<dyn CodeHasher>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Cooldown and lock checks over the same store
    guard: VerificationGuard<R>,
}

impl<R, M> VerificationService<R, M>
where
    R: VerificationRepository + ?Sized,
    M: MailDispatcher + ?Sized,
{
    /// Create a new verification service on the system clock
    ///
    /// # Arguments
    ///
    /// * `repository` - Credential store implementation
    /// * `dispatcher` - Mail dispatcher that delivers plaintext codes
    /// * `hasher` - Hasher used for stored codes
    pub fn new(repository: Arc<R>, dispatcher: Arc<M>, hasher: Arc<dyn CodeHasher>) -> Self {
        let guard = VerificationGuard::new(Arc::clone(&repository));

        Self {
            repository,
            dispatcher,
            hasher,
            clock: Arc::new(SystemClock),
            guard,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue a verification code to an email address
    ///
    /// This method:
    /// 1. Sweeps expired records across all addresses
    /// 2. Refuses issuance while the address is locked
    /// 3. Enforces the per-address cooldown
    /// 4. Generates, hashes and stores a new code
    /// 5. Hands the plaintext code to the mail dispatcher
    ///
    /// A dispatch failure is reported as `EmailSendFailed` but the stored
    /// record is kept and stays verifiable.
    ///
    /// # Returns
    ///
    /// * `Ok(IssueOutcome)` - Sent, or a business-rule failure
    /// * `Err(DomainError)` - If the store or hasher failed
    pub async fn issue(&self, address: &str) -> DomainResult<IssueOutcome> {
        let now = self.clock.now();
        let masked = mask_email(address);

        let swept = self
            .repository
            .delete_expired(now)
            .await
            .map_err(|e| log_infrastructure_error("code_issue_error", &masked, e))?;
        if swept > 0 {
            tracing::debug!(swept = swept, event = "expired_codes_swept", "Removed expired verification codes");
        }

        if self
            .guard
            .is_locked(address, now)
            .await
            .map_err(|e| log_infrastructure_error("code_issue_error", &masked, e))?
        {
            tracing::warn!(
                email = %masked,
                event = "code_issue_locked",
                "Verification code requested for locked address"
            );
            return Ok(IssueOutcome::Failed(IssueFailure::AccountLocked));
        }

        if !self
            .guard
            .can_issue(address, now)
            .await
            .map_err(|e| log_infrastructure_error("code_issue_error", &masked, e))?
        {
            tracing::warn!(
                email = %masked,
                event = "rate_limit_exceeded",
                "Verification code request rate limit exceeded"
            );
            return Ok(IssueOutcome::Failed(IssueFailure::SendTooFrequent));
        }

        let code = generate_code();
        let code_hash = self
            .hasher
            .hash(&code)
            .await
            .map_err(|e| log_infrastructure_error("code_issue_error", &masked, e))?;

        let new_record = NewVerificationRecord::new(address, code_hash, now);
        let expires_at = new_record.expires_at;
        let record_id = self
            .repository
            .insert(new_record)
            .await
            .map_err(|e| log_infrastructure_error("code_issue_error", &masked, e))?;

        tracing::info!(
            email = %masked,
            record_id = %record_id,
            event = "code_generated",
            "Generated new verification code"
        );

        match self.dispatcher.send_verification_code(address, &code).await {
            Ok(message_id) => {
                tracing::info!(
                    email = %masked,
                    provider = self.dispatcher.provider_name(),
                    message_id = %message_id,
                    event = "code_sent",
                    "Verification code delivered to mail provider"
                );
                Ok(IssueOutcome::Sent(IssuedCode {
                    record_id,
                    issued_at: now,
                    expires_at,
                    next_issue_at: next_issue_at(now),
                    message_id,
                }))
            }
            Err(e) => {
                tracing::error!(
                    email = %masked,
                    provider = self.dispatcher.provider_name(),
                    record_id = %record_id,
                    error = %e,
                    event = "code_send_failed",
                    "Failed to deliver verification code"
                );
                Ok(IssueOutcome::Failed(IssueFailure::EmailSendFailed))
            }
        }
    }

    /// Verify a candidate code for an email address
    ///
    /// Only the most recently created unexpired record is considered. A
    /// mismatch increments its attempt counter with a compare-and-swap and
    /// locks the address once the threshold is reached. A match consumes
    /// the record.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyOutcome)` - Verified, or a business-rule failure
    /// * `Err(DomainError)` - If the store or hasher failed
    pub async fn verify(&self, address: &str, candidate: &str) -> DomainResult<VerifyOutcome> {
        let now = self.clock.now();
        let masked = mask_email(address);

        let record = match self
            .repository
            .latest_unexpired(address, now)
            .await
            .map_err(|e| log_infrastructure_error("code_verify_error", &masked, e))?
        {
            Some(record) => record,
            None => {
                tracing::info!(
                    email = %masked,
                    event = "code_expired",
                    "No unexpired verification code for address"
                );
                return Ok(VerifyOutcome::Failed(VerifyFailure::CodeExpired));
            }
        };

        if record.is_locked_at(now) {
            tracing::warn!(
                email = %masked,
                record_id = %record.id,
                event = "code_verify_locked",
                "Verification attempted on locked address"
            );
            return Ok(VerifyOutcome::Failed(VerifyFailure::AccountLocked));
        }

        if !is_valid_code_format(candidate) {
            tracing::warn!(
                email = %masked,
                code_length = candidate.len(),
                event = "invalid_code_format",
                "Invalid verification code format provided"
            );
            return Ok(VerifyOutcome::Failed(VerifyFailure::CodeInvalid));
        }

        let matches = self
            .hasher
            .verify(candidate, &record.code_hash)
            .await
            .map_err(|e| log_infrastructure_error("code_verify_error", &masked, e))?;

        if matches {
            return self.consume(record, &masked).await;
        }

        self.record_failure(record, now, &masked).await
    }

    async fn consume(&self, record: VerificationRecord, masked: &str) -> DomainResult<VerifyOutcome> {
        let deleted = self
            .repository
            .delete(record.id)
            .await
            .map_err(|e| log_infrastructure_error("code_verify_error", masked, e))?;

        if !deleted {
            // A concurrent verify consumed it first
            tracing::warn!(
                email = %masked,
                record_id = %record.id,
                event = "code_already_consumed",
                "Verification code consumed by a concurrent request"
            );
            return Ok(VerifyOutcome::Failed(VerifyFailure::CodeExpired));
        }

        tracing::info!(
            email = %masked,
            record_id = %record.id,
            event = "code_verified",
            "Verification code successfully verified"
        );

        Ok(VerifyOutcome::Verified(VerifiedCode {
            record_id: record.id,
            address: record.address,
        }))
    }

    async fn record_failure(
        &self,
        mut record: VerificationRecord,
        now: chrono::DateTime<chrono::Utc>,
        masked: &str,
    ) -> DomainResult<VerifyOutcome> {
        for _ in 0..MAX_ATTEMPT_UPDATE_TRIES {
            let failure = record.next_failure(now);
            let updated = self
                .repository
                .set_attempts(record.id, record.attempts, failure.attempts, failure.locked_until)
                .await
                .map_err(|e| log_infrastructure_error("code_verify_error", masked, e))?;

            if updated {
                if failure.triggers_lock() {
                    tracing::warn!(
                        email = %masked,
                        record_id = %record.id,
                        attempts = failure.attempts,
                        event = "max_attempts_exceeded",
                        "Maximum verification attempts exceeded, address locked"
                    );
                    return Ok(VerifyOutcome::Failed(VerifyFailure::TooManyAttempts));
                }

                tracing::warn!(
                    email = %masked,
                    record_id = %record.id,
                    attempts = failure.attempts,
                    event = "code_verification_failed",
                    "Verification code did not match"
                );
                return Ok(VerifyOutcome::Failed(VerifyFailure::CodeInvalid));
            }

            // Lost the compare-and-swap; re-read and try again from fresh state
            record = match self
                .repository
                .find_by_id(record.id)
                .await
                .map_err(|e| log_infrastructure_error("code_verify_error", masked, e))?
            {
                Some(current) => current,
                None => return Ok(VerifyOutcome::Failed(VerifyFailure::CodeExpired)),
            };

            if record.is_locked_at(now) {
                return Ok(VerifyOutcome::Failed(VerifyFailure::AccountLocked));
            }
        }

        tracing::warn!(
            email = %masked,
            record_id = %record.id,
            event = "attempt_update_contended",
            "Gave up recording failed attempt under contention"
        );
        Ok(VerifyOutcome::Failed(VerifyFailure::CodeInvalid))
    }
}

fn log_infrastructure_error(event: &'static str, masked: &str, error: DomainError) -> DomainError {
    tracing::error!(
        email = %masked,
        error = %error,
        event = event,
        "Verification infrastructure failure"
    );
    error
}
