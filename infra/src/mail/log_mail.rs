//! Log Mail Service Implementation
//!
//! A development implementation of the mail service. Messages are written
//! to the log instead of being delivered.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use ww_shared::validation::mask_email;

use super::email_service::EmailService;
use super::template::{verification_email, EmailMessage};
use crate::InfrastructureError;

/// Mail service that logs instead of sending
#[derive(Clone, Default)]
pub struct LogMailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
}

impl LogMailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailService for LogMailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let message_id = format!("log-{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            event = "mail_logged",
            "Mail written to log instead of being delivered"
        );

        Ok(message_id)
    }

    async fn send_verification_code(
        &self,
        address: &str,
        code: &str,
    ) -> Result<String, InfrastructureError> {
        debug!(to = %mask_email(address), code = code, "Development verification code");

        let message = verification_email(address, code, Utc::now().year());
        self.send_email(&message).await
    }

    fn provider_name(&self) -> &str {
        "log"
    }
}
