//! Server bootstrap shared by every store backend

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use bo_core::repositories::otp::OtpStore;
use bo_core::services::otp::{OtpService, OtpServiceConfig, OtpSweeper};
use bo_infra::delivery::MockOtpDelivery;
use bo_shared::config::AppConfig;

use crate::app::create_app;
use crate::routes::otp::AppState;

/// Wire the service around `store` and serve until shutdown
pub async fn run<S>(config: AppConfig, store: Arc<S>) -> anyhow::Result<()>
where
    S: OtpStore + 'static,
{
    let delivery = Arc::new(MockOtpDelivery::new());
    let otp_service = Arc::new(OtpService::new(
        Arc::clone(&store),
        delivery,
        OtpServiceConfig::new(config.otp.code_ttl_seconds),
    ));

    let sweeper = Arc::new(OtpSweeper::new(
        Arc::clone(&store),
        config.otp.sweep_interval_seconds,
    ));
    let sweeper_task = sweeper.start_background_task();

    if config.environment.is_production() && config.otp.expose_error_details {
        warn!("Internal error details are exposed in production responses");
    }

    let app_state = web::Data::new(AppState::new(otp_service, config.otp.expose_error_details));
    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    info!(
        bind_address = %bind_address,
        store = store.backend_name(),
        environment = %config.environment,
        "Starting OTP verification server"
    );

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, max_payload_size)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    if let Some(task) = sweeper_task {
        task.abort();
    }

    info!("Server stopped");
    Ok(())
}
