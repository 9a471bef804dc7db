//! Health check endpoint
//!
//! `GET /health` runs every registered dependency check and answers 503
//! when any of them fails.

use std::collections::HashMap;
use std::time::Instant;

use actix_web::{web, HttpResponse};
use async_trait::async_trait;

use ww_core::repositories::VerificationRepository;
use ww_core::services::MailDispatcher;
use ww_infra::database::DatabasePool;
use ww_shared::{HealthResponse, HealthStatus, ServiceHealth};

use super::auth::AppState;

/// A backing dependency whose reachability is reported by `/health`
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Key under `services` in the health response
    fn name(&self) -> &str;

    /// Returns the failure reason when the dependency is unreachable
    async fn check(&self) -> Result<(), String>;
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> Result<(), String> {
        match self.health_check().await {
            Ok(true) => Ok(()),
            Ok(false) => Err("unexpected result from connectivity query".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Handler for GET /health
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "healthy",
///     "service": "workwrap-api",
///     "services": { "database": { "status": "healthy", "response_time_ms": 2 } },
///     "timestamp": "2026-03-01T09:00:00Z",
///     "version": "0.1.0"
/// }
/// ```
///
/// ## Errors
/// - 503 Service Unavailable: same body with `"status": "unhealthy"`
pub async fn health_check<R, M>(state: web::Data<AppState<R, M>>) -> HttpResponse
where
    R: VerificationRepository + ?Sized + 'static,
    M: MailDispatcher + ?Sized + 'static,
{
    let mut services = HashMap::new();

    for check in &state.health_checks {
        let started = Instant::now();
        let status = match check.check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(error) => {
                tracing::error!(
                    dependency = check.name(),
                    error = %error,
                    event = "health_check_failed",
                    "Dependency health check failed"
                );
                HealthStatus::Unhealthy
            }
        };

        services.insert(
            check.name().to_string(),
            ServiceHealth {
                status,
                response_time_ms: Some(
                    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                ),
            },
        );
    }

    let response = HealthResponse::from_services("workwrap-api", env!("CARGO_PKG_VERSION"), services);
    if response.is_healthy() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
