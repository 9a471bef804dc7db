//! Resend Mail Service Implementation
//!
//! This module delivers mail through the Resend HTTP API.
//!
//! ## Features
//!
//! - Bearer-token authentication
//! - Automatic retry with exponential backoff on rate limiting and server errors
//! - Immediate failure on other client errors
//! - Security: recipient masking in logs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use ww_shared::config::MailConfig;
use ww_shared::validation::mask_email;

use super::email_service::EmailService;
use super::template::EmailMessage;
use crate::InfrastructureError;

/// Resend mail service configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// Resend API key
    pub api_key: String,
    /// Sender, e.g. `WorkWrap <noreply@workwrap.dev>`
    pub from_address: String,
    /// API base URL without trailing slash
    pub api_base_url: String,
    /// Maximum send attempts for retryable failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl ResendConfig {
    /// Build from the shared mail configuration, requiring credentials
    pub fn from_mail_config(config: &MailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "AUTH_RESEND_KEY environment variable is not set".to_string(),
            ));
        }
        if config.from_address.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "AUTH_EMAIL_FROM environment variable is not set".to_string(),
            ));
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.timeout_secs,
        })
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Resend mail service implementation
pub struct ResendMailService {
    client: Client,
    config: ResendConfig,
}

impl ResendMailService {
    /// Create a new Resend mail service
    pub fn new(config: ResendConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %config.from_address,
            api_base_url = %config.api_base_url,
            "Resend mail service initialized"
        );

        Ok(Self { client, config })
    }

    /// Send with retry logic
    async fn send_with_retry(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let url = format!("{}/emails", self.config.api_base_url);
        let body = SendEmailRequest {
            from: &self.config.from_address,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };
        let max_attempts = self.config.max_retries.max(1);
        let masked = mask_email(&message.to);

        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending mail attempt {}/{} to {}",
                attempts, max_attempts, masked
            );

            let result = self
                .client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(&body)
                .send()
                .await;

            let failure = match result {
                Ok(response) if response.status().is_success() => {
                    let message_id = accepted_message_id(response).await;
                    info!(
                        to = %masked,
                        message_id = %message_id,
                        "Mail sent successfully via Resend"
                    );
                    return Ok(message_id);
                }
                Ok(response) => {
                    let status = response.status();
                    let detail = response.text().await.unwrap_or_default();

                    if !is_retryable(status) {
                        error!(
                            to = %masked,
                            status = %status,
                            "Resend rejected mail request"
                        );
                        return Err(InfrastructureError::Mail(format!(
                            "Resend rejected request with {}: {}",
                            status, detail
                        )));
                    }
                    format!("{}: {}", status, detail)
                }
                Err(e) if e.is_timeout() || e.is_connect() => e.to_string(),
                Err(e) => return Err(InfrastructureError::Http(e)),
            };

            error!(
                "Failed to send mail (attempt {}/{}): {}",
                attempts, max_attempts, failure
            );

            if attempts >= max_attempts {
                return Err(InfrastructureError::Mail(format!(
                    "Failed to send mail after {} attempts: {}",
                    attempts, failure
                )));
            }

            warn!("Retrying mail delivery after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

/// Message id from an accepted send
///
/// Resend has already queued the mail at this point, so an unreadable body
/// yields a local placeholder id instead of an error.
async fn accepted_message_id(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<SendEmailResponse>(&body) {
        Ok(sent) => sent.id,
        Err(e) => {
            warn!(
                error = %e,
                body = %body,
                "Resend accepted mail but returned an unreadable body"
            );
            format!("resend-{}", Uuid::new_v4())
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

#[async_trait]
impl EmailService for ResendMailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            "Sending mail via Resend"
        );

        self.send_with_retry(message).await
    }

    fn provider_name(&self) -> &str {
        "Resend"
    }
}
