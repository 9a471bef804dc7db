//! API response types and wrappers

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for successful requests
///
/// Failures are answered with [`crate::ErrorResponse`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true`; kept so clients can branch on one field
    pub success: bool,

    /// Response data
    pub data: T,

    /// Response timestamp
    pub timestamp: DateTime<Utc>,

    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
            request_id: None,
        }
    }

    /// Add request ID for tracing
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Individual dependency checks, keyed by dependency name
    pub services: HashMap<String, ServiceHealth>,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

impl HealthResponse {
    /// Build a response whose overall status is the worst of `services`
    pub fn from_services(
        service: impl Into<String>,
        version: impl Into<String>,
        services: HashMap<String, ServiceHealth>,
    ) -> Self {
        let status = if services
            .values()
            .any(|health| health.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Healthy
        };

        Self {
            status,
            service: service.into(),
            services,
            timestamp: Utc::now(),
            version: version.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual service health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Service status
    pub status: HealthStatus,

    /// Response time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = ApiResponse::success("ok").with_request_id("req-1");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "ok");
        assert_eq!(json["request_id"], "req-1");
    }

    #[test]
    fn test_request_id_omitted_when_absent() {
        let json = serde_json::to_value(ApiResponse::success(1)).unwrap();
        assert!(json.get("request_id").is_none());
    }

    #[test]
    fn test_health_response_takes_worst_status() {
        let mut services = HashMap::new();
        services.insert(
            "database".to_string(),
            ServiceHealth {
                status: HealthStatus::Healthy,
                response_time_ms: Some(2),
            },
        );
        let healthy = HealthResponse::from_services("workwrap-api", "0.1.0", services.clone());
        assert!(healthy.is_healthy());

        services.insert(
            "cache".to_string(),
            ServiceHealth {
                status: HealthStatus::Unhealthy,
                response_time_ms: None,
            },
        );
        let degraded = HealthResponse::from_services("workwrap-api", "0.1.0", services);
        assert!(!degraded.is_healthy());

        let json = serde_json::to_value(&degraded).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["services"]["database"]["status"], "healthy");
        assert!(json["services"]["cache"].get("response_time_ms").is_none());
    }
}
