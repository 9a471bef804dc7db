//! Mapping from verification outcomes to HTTP responses
//!
//! Every failure body is an `ErrorResponse` whose `message` is a
//! localizable key. Translation happens in the client.

use actix_web::{http::StatusCode, HttpResponse};

use ww_core::errors::{DomainError, IssueFailure, VerifyFailure};
use ww_shared::errors::{error_codes, message_keys};
use ww_shared::ErrorResponse;

/// Status and error code for an issuance rejection
pub fn issue_failure_status(failure: IssueFailure) -> (StatusCode, &'static str) {
    match failure {
        IssueFailure::AccountLocked => (StatusCode::LOCKED, error_codes::ACCOUNT_LOCKED),
        IssueFailure::SendTooFrequent => {
            (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMIT_EXCEEDED)
        }
        IssueFailure::EmailSendFailed => {
            (StatusCode::SERVICE_UNAVAILABLE, error_codes::EMAIL_SEND_FAILED)
        }
    }
}

/// Status and error code for a verification rejection
pub fn verify_failure_status(failure: VerifyFailure) -> (StatusCode, &'static str) {
    match failure {
        VerifyFailure::AccountLocked => (StatusCode::LOCKED, error_codes::ACCOUNT_LOCKED),
        VerifyFailure::TooManyAttempts => {
            (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMIT_EXCEEDED)
        }
        VerifyFailure::CodeExpired => (StatusCode::GONE, error_codes::VERIFICATION_CODE_EXPIRED),
        VerifyFailure::CodeInvalid => {
            (StatusCode::BAD_REQUEST, error_codes::VERIFICATION_CODE_INVALID)
        }
    }
}

pub fn issue_failure_response(failure: IssueFailure) -> HttpResponse {
    let (status, code) = issue_failure_status(failure);
    error_response(status, code, failure.message_key())
}

pub fn verify_failure_response(failure: VerifyFailure) -> HttpResponse {
    let (status, code) = verify_failure_status(failure);
    error_response(status, code, failure.message_key())
}

/// 400 for a request body that failed field validation
pub fn validation_error_response(message_key: &str) -> HttpResponse {
    error_response(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message_key)
}

/// 500 for an infrastructure failure
///
/// The error itself is logged by the service; only the generic key for
/// the operation reaches the client.
pub fn domain_error_response(error: &DomainError, message_key: &str) -> HttpResponse {
    tracing::debug!(error = %error, "Responding with internal error");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        message_key,
    )
}

/// Body used for unparseable JSON payloads
pub fn invalid_request_body() -> ErrorResponse {
    ErrorResponse::new(error_codes::BAD_REQUEST, message_keys::INVALID_REQUEST)
}

pub fn not_found_response() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
}

fn error_response(status: StatusCode, code: &str, message_key: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(code, message_key))
}
