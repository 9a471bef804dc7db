//! Email address and verification code validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::message_keys;

/// Length of a verification code
pub const CODE_LENGTH: usize = 6;

/// Maximum accepted length of an email address (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Pragmatic email pattern: one `@`, no whitespace, a dot in the domain
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Check if an email address is well formed
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Check if a verification code candidate is exactly six ASCII digits
pub fn is_valid_code_format(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Validate an email address, returning the message key on failure
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() {
        return Err(message_keys::EMAIL_REQUIRED);
    }
    if !is_valid_email(email) {
        return Err(message_keys::EMAIL_INVALID);
    }
    Ok(())
}

/// Validate a verification code candidate, returning the message key on failure
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if is_valid_code_format(code) {
        Ok(())
    } else {
        Err(message_keys::CODE_INVALID)
    }
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the full domain.
///
/// # Example
///
/// ```
/// use ww_shared::validation::mask_email;
///
/// assert_eq!(mask_email("alice@example.com"), "a***@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
