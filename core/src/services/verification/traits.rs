//! Trait for mail delivery integration

use async_trait::async_trait;

/// Delivers a plaintext verification code to an email address
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    /// Send a verification code, returning the provider message id
    async fn send_verification_code(&self, address: &str, code: &str) -> Result<String, String>;
    /// Name of the delivery provider, for logs
    fn provider_name(&self) -> &str;
}
