//! Mail Service Module
//!
//! This module provides mail delivery for verification codes. It includes
//! a production provider and a logging implementation for development.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all mail providers
//! - **Log Implementation**: Writes messages to the log for development
//! - **Resend Support**: Production delivery via the Resend HTTP API
//! - **Templates**: HTML and plain-text verification messages
//! - **Security**: Recipient masking in logs

use std::sync::Arc;

use ww_core::services::MailDispatcher;
use ww_shared::config::{MailConfig, MailProvider};

use crate::InfrastructureError;

pub mod adapter;
pub mod email_service;
pub mod log_mail;
pub mod template;

// Resend mail service (feature-gated)
#[cfg(feature = "resend-mail")]
pub mod resend;

// Re-export commonly used types
pub use adapter::MailDispatcherAdapter;
pub use email_service::EmailService;
pub use log_mail::LogMailService;
pub use template::{verification_email, EmailMessage, VERIFICATION_SUBJECT};

#[cfg(feature = "resend-mail")]
pub use resend::{ResendConfig, ResendMailService};

#[cfg(test)]
mod tests;

/// Create the mail dispatcher selected by configuration
///
/// A misconfigured provider is an error; there is no fallback to the log
/// provider.
///
/// # Arguments
///
/// * `config` - Mail configuration containing provider settings
pub fn create_mail_dispatcher(
    config: &MailConfig,
) -> Result<Arc<dyn MailDispatcher>, InfrastructureError> {
    match config.provider {
        MailProvider::Log => {
            tracing::warn!("Using log mail provider; verification codes are not delivered");
            Ok(Arc::new(MailDispatcherAdapter::new(LogMailService::new())))
        }
        #[cfg(feature = "resend-mail")]
        MailProvider::Resend => {
            let resend_config = ResendConfig::from_mail_config(config)?;
            let service = ResendMailService::new(resend_config)?;
            Ok(Arc::new(MailDispatcherAdapter::new(service)))
        }
        #[cfg(not(feature = "resend-mail"))]
        MailProvider::Resend => Err(InfrastructureError::Config(
            "Resend mail provider requires the resend-mail feature".to_string(),
        )),
    }
}
