use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use ww_api::{create_app, telemetry, AppState};
use ww_core::services::{BcryptCodeHasher, VerificationService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env, then reads and validates the environment
    let config = ww_infra::config::load_config().context("invalid configuration")?;

    telemetry::init_tracing(&config.logging)?;

    info!(environment = %config.environment, "Starting WorkWrap API server");

    let services = ww_infra::initialize(&config)
        .await
        .context("failed to initialize infrastructure")?;

    let hasher = Arc::new(BcryptCodeHasher::new(config.verification.hash_cost));
    let verification_service = Arc::new(VerificationService::new(
        Arc::clone(&services.repository),
        Arc::clone(&services.dispatcher),
        hasher,
    ));
    let app_state = web::Data::new(
        AppState::new(verification_service).with_health_check(Arc::new(services.pool.clone())),
    );

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let environment = config.environment;
    let server_config = config.server.clone();
    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), environment, &server_config)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    services.pool.close().await;
    info!("Server stopped");

    Ok(())
}
