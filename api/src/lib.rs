//! HTTP surface of the WorkWrap email verification flow
//!
//! Library exports for the binary and the HTTP tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure_routes, create_app};
pub use routes::auth::AppState;
pub use routes::health::HealthCheck;
