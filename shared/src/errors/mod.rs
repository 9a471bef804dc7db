//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Localizable message key, e.g. `errors.codeInvalid`
    pub message: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Machine-readable error codes used in `ErrorResponse::error`
pub mod error_codes {
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const ACCOUNT_LOCKED: &str = "ACCOUNT_LOCKED";
    pub const EMAIL_SEND_FAILED: &str = "EMAIL_SEND_FAILED";
    pub const VERIFICATION_CODE_INVALID: &str = "VERIFICATION_CODE_INVALID";
    pub const VERIFICATION_CODE_EXPIRED: &str = "VERIFICATION_CODE_EXPIRED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Localizable message keys returned to callers.
///
/// Translation happens in the presentation layer; the server only ever
/// emits these keys.
pub mod message_keys {
    pub const ACCOUNT_LOCKED: &str = "errors.accountLocked";
    pub const SEND_TOO_FREQUENT: &str = "errors.sendTooFrequent";
    pub const EMAIL_SEND_FAILED: &str = "errors.emailSendFailed";
    pub const CODE_EXPIRED: &str = "errors.codeExpired";
    pub const TOO_MANY_ATTEMPTS: &str = "errors.tooManyAttempts";
    pub const CODE_INVALID: &str = "errors.codeInvalid";
    pub const EMAIL_INVALID: &str = "errors.emailInvalid";
    pub const EMAIL_REQUIRED: &str = "errors.emailRequired";
    pub const SEND_CODE_FAILED: &str = "errors.sendCodeFailed";
    pub const VERIFY_CODE_FAILED: &str = "errors.verifyCodeFailed";
    pub const INVALID_REQUEST: &str = "errors.invalidRequest";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse::new(error_codes::RATE_LIMIT_EXCEEDED, message_keys::SEND_TOO_FREQUENT);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["error"], "RATE_LIMIT_EXCEEDED");
        assert_eq!(json["message"], "errors.sendTooFrequent");
        assert!(json.get("timestamp").is_some());
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
