use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use bo_api::{server, telemetry};
use bo_core::repositories::otp::InMemoryOtpStore;
use bo_infra::cache::{RedisClient, RedisOtpStore};
use bo_shared::config::{AppConfig, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        store = ?config.otp.store,
        "Loaded configuration"
    );

    match config.otp.store {
        // Single-process only: codes do not survive restarts or reach other instances
        StoreBackend::Memory => server::run(config, Arc::new(InMemoryOtpStore::new())).await,
        StoreBackend::Redis => {
            let client = RedisClient::new(config.cache.clone())
                .await
                .context("Failed to connect to Redis")?;
            server::run(config, Arc::new(RedisOtpStore::new(client))).await
        }
    }
}
