use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use ww_shared::errors::message_keys;
use ww_shared::validation::{validate_code, validate_email};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Address the code is delivered to
    #[serde(default)]
    #[validate(custom = "validate_email_field")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    #[validate(custom = "validate_email_field")]
    pub email: String,

    /// 6-digit verification code
    #[serde(default)]
    #[validate(custom = "validate_code_field")]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    pub resend_after: i64, // seconds until can resend
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
    pub email: String,
}

fn validate_email_field(email: &str) -> Result<(), ValidationError> {
    validate_email(email).map_err(ValidationError::new)
}

fn validate_code_field(code: &str) -> Result<(), ValidationError> {
    validate_code(code).map_err(ValidationError::new)
}

/// Message key of the first failing field, checking fields in request order
pub fn first_message_key(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    ["email", "code"]
        .iter()
        .filter_map(|field| field_errors.get(field))
        .chain(field_errors.values())
        .flat_map(|errors| errors.iter())
        .map(|error| error.code.to_string())
        .next()
        .unwrap_or_else(|| message_keys::INVALID_REQUEST.to_string())
}
