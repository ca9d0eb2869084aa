//! Mock implementations for testing the OTP service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::entities::pending_otp::{Attempt, PendingOtp};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::otp::OtpStore;
use crate::services::otp::OtpDelivery;

// Mock delivery channel recording the last code per phone
pub struct MockDelivery {
    pub sent_codes: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
}

impl MockDelivery {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_codes: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn get_sent_code(&self, phone: &str) -> Option<String> {
        self.sent_codes.lock().unwrap().get(phone).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_codes.lock().unwrap().len()
    }
}

#[async_trait]
impl OtpDelivery for MockDelivery {
    async fn deliver(&self, otp: &PendingOtp) -> Result<String, String> {
        if self.should_fail {
            return Err("SMS gateway unavailable".to_string());
        }
        self.sent_codes
            .lock()
            .unwrap()
            .insert(otp.phone.clone(), otp.code.clone());
        Ok(format!("mock-msg-{}", otp.phone))
    }

    fn channel_name(&self) -> &'static str {
        "mock"
    }
}

// Store whose every call fails, to exercise internal error paths
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
