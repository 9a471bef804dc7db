//! Email Service Interface
//!
//! Defines the trait for mail provider implementations that deliver
//! verification codes.

use async_trait::async_trait;
use chrono::{Datelike, Utc};

use super::template::{verification_email, EmailMessage};
use crate::InfrastructureError;

/// Email service trait for sending messages
///
/// Implementations include:
/// - Resend HTTP API
/// - Log implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a rendered message
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier assigned by the provider
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Send a verification code
    ///
    /// Renders the standard verification message and sends it.
    async fn send_verification_code(
        &self,
        address: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        let message = verification_email(address, code, Utc::now().year());
        self.send_email(&message).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
