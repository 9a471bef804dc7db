//! Application factory
//!
//! Builds the Actix-web application around an already wired verification
//! service. The binary and the HTTP tests share this factory.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use crate::handlers::error::{invalid_request_body, not_found_response};
use crate::middleware::create_cors;
use crate::routes::auth::{send_code::send_code, verify_code::verify_code, AppState};
use crate::routes::health::health_check;

use ww_core::repositories::VerificationRepository;
use ww_core::services::MailDispatcher;
use ww_shared::config::{Environment, ServerConfig};

/// Create and configure the application with all dependencies
pub fn create_app<R, M>(
    app_state: web::Data<AppState<R, M>>,
    environment: Environment,
    server: &ServerConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: VerificationRepository + ?Sized + 'static,
    M: MailDispatcher + ?Sized + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        // Outermost first: request spans, then CORS
        .wrap(create_cors(environment, server))
        .wrap(TracingLogger::default())
        .configure(configure_routes::<R, M>)
        .default_service(web::route().to(not_found))
}

/// Register the health check and the versioned API routes
pub fn configure_routes<R, M>(cfg: &mut web::ServiceConfig)
where
    R: VerificationRepository + ?Sized + 'static,
    M: MailDispatcher + ?Sized + 'static,
{
    cfg.route("/health", web::get().to(health_check::<R, M>)).service(
        web::scope("/api/v1").service(
            web::scope("/auth")
                .route("/send-code", web::post().to(send_code::<R, M>))
                .route("/verify-code", web::post().to(verify_code::<R, M>)),
        ),
    );
}

/// Malformed or non-JSON bodies answer with a 400 `ErrorResponse`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::warn!(error = %err, event = "invalid_request_body", "Rejected request body");
        let response = HttpResponse::BadRequest().json(invalid_request_body());
        InternalError::from_response(err, response).into()
    })
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    not_found_response()
}
