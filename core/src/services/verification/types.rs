//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{IssueFailure, VerifyFailure};

/// Details of a successfully issued and delivered code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuedCode {
    /// Identifier of the stored record
    pub record_id: Uuid,
    /// Instant the code was created
    pub issued_at: DateTime<Utc>,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// When the caller can request another code
    pub next_issue_at: DateTime<Utc>,
    /// Message id reported by the mail provider
    pub message_id: String,
}

/// Result of `VerificationService::issue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    Sent(IssuedCode),
    Failed(IssueFailure),
}

impl IssueOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, IssueOutcome::Sent(_))
    }

    /// The business failure, if any
    pub fn failure(&self) -> Option<IssueFailure> {
        match self {
            IssueOutcome::Sent(_) => None,
            IssueOutcome::Failed(failure) => Some(*failure),
        }
    }
}

/// A consumed verification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedCode {
    pub record_id: Uuid,
    pub address: String,
}

/// Result of `VerificationService::verify`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified(VerifiedCode),
    Failed(VerifyFailure),
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified(_))
    }

    /// The business failure, if any
    pub fn failure(&self) -> Option<VerifyFailure> {
        match self {
            VerifyOutcome::Verified(_) => None,
            VerifyOutcome::Failed(failure) => Some(*failure),
        }
    }
}
