//! CORS middleware configuration for cross-origin requests.
//!
//! Development is permissive so local web clients and tools can reach the
//! API. Every other environment only admits the configured origins.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ww_shared::config::{Environment, ServerConfig};

/// Creates a CORS middleware instance configured for the given environment.
///
/// # Configuration
/// - `ServerConfig::allowed_origins`: origins admitted outside development
/// - `ServerConfig::cors_max_age`: max age for preflight caching
pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    if environment.is_development() {
        create_development_cors(server.cors_max_age)
    } else {
        create_restricted_cors(&server.allowed_origins, server.cors_max_age)
    }
}

fn create_development_cors(max_age: usize) -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age)
}

fn create_restricted_cors(allowed_origins: &[String], max_age: usize) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(max_age);

    for origin in allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed CORS origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}
