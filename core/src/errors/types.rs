//! Business-rule failure kinds for the verification flow
//!
//! Each kind maps to a localizable message key. Translation is handled by
//! the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use ww_shared::errors::message_keys;

/// Why a code could not be issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueFailure {
    /// The address is within its lockout window
    AccountLocked,
    /// The cooldown since the last issuance has not elapsed
    SendTooFrequent,
    /// The mail dispatcher could not deliver; the stored code stays valid
    EmailSendFailed,
}

impl IssueFailure {
    /// Localizable message key for this failure
    pub fn message_key(&self) -> &'static str {
        match self {
            IssueFailure::AccountLocked => message_keys::ACCOUNT_LOCKED,
            IssueFailure::SendTooFrequent => message_keys::SEND_TOO_FREQUENT,
            IssueFailure::EmailSendFailed => message_keys::EMAIL_SEND_FAILED,
        }
    }
}

impl fmt::Display for IssueFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_key())
    }
}

/// Why a candidate code was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerifyFailure {
    /// No unexpired record exists for the address
    CodeExpired,
    /// The address is within its lockout window
    AccountLocked,
    /// This failed attempt triggered the lock
    TooManyAttempts,
    /// The code did not match and the lock was not triggered
    CodeInvalid,
}

impl VerifyFailure {
    /// Localizable message key for this failure
    pub fn message_key(&self) -> &'static str {
        match self {
            VerifyFailure::CodeExpired => message_keys::CODE_EXPIRED,
            VerifyFailure::AccountLocked => message_keys::ACCOUNT_LOCKED,
            VerifyFailure::TooManyAttempts => message_keys::TOO_MANY_ATTEMPTS,
            VerifyFailure::CodeInvalid => message_keys::CODE_INVALID,
        }
    }
}

impl fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_failure_message_keys() {
        assert_eq!(IssueFailure::AccountLocked.message_key(), "errors.accountLocked");
        assert_eq!(IssueFailure::SendTooFrequent.message_key(), "errors.sendTooFrequent");
        assert_eq!(IssueFailure::EmailSendFailed.to_string(), "errors.emailSendFailed");
    }

    #[test]
    fn test_verify_failure_message_keys() {
        assert_eq!(VerifyFailure::CodeExpired.message_key(), "errors.codeExpired");
        assert_eq!(VerifyFailure::AccountLocked.message_key(), "errors.accountLocked");
        assert_eq!(VerifyFailure::TooManyAttempts.message_key(), "errors.tooManyAttempts");
        assert_eq!(VerifyFailure::CodeInvalid.to_string(), "errors.codeInvalid");
    }

    #[test]
    fn test_failure_serializes_camel_case() {
        let json = serde_json::to_string(&VerifyFailure::TooManyAttempts).unwrap();
        assert_eq!(json, "\"tooManyAttempts\"");
    }
}
