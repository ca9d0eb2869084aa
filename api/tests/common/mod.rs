//! Shared helpers for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use bo_api::routes::otp::AppState;
use bo_core::domain::entities::pending_otp::{Attempt, PendingOtp};
use bo_core::errors::{DomainError, DomainResult};
use bo_core::repositories::otp::{InMemoryOtpStore, OtpStore};
use bo_core::services::otp::{OtpService, OtpServiceConfig};
use bo_infra::delivery::MockOtpDelivery;
use bo_shared::config::CorsConfig;

pub const PHONE: &str = "+966501234567";
pub const EMAIL: &str = "u@x.com";
pub const MAX_PAYLOAD: usize = 64 * 1024;

pub fn memory_state(
    store: Arc<InMemoryOtpStore>,
    delivery: MockOtpDelivery,
) -> web::Data<AppState<InMemoryOtpStore, MockOtpDelivery>> {
    let service = OtpService::new(store, Arc::new(delivery), OtpServiceConfig::default());
    web::Data::new(AppState::new(Arc::new(service), true))
}

pub fn failing_state(expose_error_details: bool) -> web::Data<AppState<FailingStore, MockOtpDelivery>> {
    let service = OtpService::new(
        Arc::new(FailingStore),
        Arc::new(MockOtpDelivery::new()),
        OtpServiceConfig::default(),
    );
    web::Data::new(AppState::new(Arc::new(service), expose_error_details))
}

pub fn cors() -> CorsConfig {
    CorsConfig::default()
}

pub async fn seed(store: &InMemoryOtpStore, email: &str, code: &str) {
    store
        .put(PendingOtp::new(PHONE, email, code, Duration::minutes(5)))
        .await
        .unwrap();
}

pub async fn seed_expired(store: &InMemoryOtpStore, email: &str, code: &str) {
    let mut otp = PendingOtp::new(PHONE, email, code, Duration::minutes(5));
    otp.expires_at = Utc::now() - Duration::seconds(1);
    store.put(otp).await.unwrap();
}

/// Store that fails every call
pub struct FailingStore;

fn unavailable() -> DomainError {
    DomainError::internal("store unavailable")
}

#[async_trait]
impl OtpStore for FailingStore {
    async fn put(&self, _otp: PendingOtp) -> DomainResult<()> {
        Err(unavailable())
    }

    async fn get(&self, _phone: &str) -> DomainResult<Option<PendingOtp>> {
        Err(unavailable())
    }

    async fn delete(&self, _phone: &str) -> DomainResult<bool> {
        Err(unavailable())
    }

    async fn find_by_email(&self, _email: &str) -> DomainResult<Option<PendingOtp>> {
        Err(unavailable())
    }

    async fn attempt_by_email(
        &self,
        _email: &str,
        _code: &str,
        _now: DateTime<Utc>,
    ) -> DomainResult<Option<Attempt>> {
        Err(unavailable())
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> DomainResult<usize> {
        Err(unavailable())
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
