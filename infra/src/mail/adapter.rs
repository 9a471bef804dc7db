//! Mail Dispatcher Adapter
//!
//! Implements the core MailDispatcher trait for any infrastructure
//! EmailService, bridging provider errors into the plain failure reason the
//! verification service expects.

use async_trait::async_trait;
use ww_core::services::MailDispatcher;

use super::email_service::EmailService;

/// Adapter that implements the core MailDispatcher for an EmailService
pub struct MailDispatcherAdapter<S: EmailService> {
    inner: S,
}

impl<S: EmailService> MailDispatcherAdapter<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: EmailService> MailDispatcher for MailDispatcherAdapter<S> {
    async fn send_verification_code(&self, address: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(address, code)
            .await
            .map_err(|e| e.to_string())
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
