//! Authentication route handlers
//!
//! This module contains the email verification endpoints:
//! - Sending a verification code
//! - Verifying a submitted code

pub mod send_code;
pub mod verify_code;

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use tracing_actix_web::RequestId;

use ww_core::repositories::VerificationRepository;
use ww_core::services::{MailDispatcher, VerificationService};

use super::health::HealthCheck;

/// Application state that holds shared services
pub struct AppState<R, M>
where
    R: VerificationRepository + ?Sized,
    M: MailDispatcher + ?Sized,
{
    pub verification_service: Arc<VerificationService<R, M>>,
    /// Dependencies reported by `/health`
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl<R, M> AppState<R, M>
where
    R: VerificationRepository + ?Sized,
    M: MailDispatcher + ?Sized,
{
    pub fn new(verification_service: Arc<VerificationService<R, M>>) -> Self {
        Self {
            verification_service,
            health_checks: Vec::new(),
        }
    }

    /// Register a dependency for `/health` to check
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}

impl<R, M> Clone for AppState<R, M>
where
    R: VerificationRepository + ?Sized,
    M: MailDispatcher + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            verification_service: Arc::clone(&self.verification_service),
            health_checks: self.health_checks.clone(),
        }
    }
}

/// Request id assigned by the tracing middleware, when it is installed
pub(crate) fn request_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<RequestId>().map(|id| id.to_string())
}
