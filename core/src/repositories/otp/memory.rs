//! In-process OTP store backed by a lock-guarded map.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::pending_otp::{Attempt, PendingOtp};
use crate::errors::DomainResult;

use super::r#trait::OtpStore;

/// Pending codes held in memory, keyed by phone.
///
/// Every operation that reads and then mutates holds the write lock for its
/// whole duration.
#[derive(Clone, Default)]
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<String, PendingOtp>>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn newest_phone_for_email(records: &HashMap<String, PendingOtp>, email: &str) -> Option<String> {
    records
        .values()
        .filter(|record| record.email == email)
        .max_by_key(|record| record.created_at)
        .map(|record| record.phone.clone())
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, otp: PendingOtp) -> DomainResult<()> {
        let mut records = self.records.write().await;
        records.insert(otp.phone.clone(), otp);
        Ok(())
    }

    async fn get(&self, phone: &str) -> DomainResult<Option<PendingOtp>> {
        let records = self.records.read().await;
        Ok(records.get(phone).cloned())
    }

    async fn delete(&self, phone: &str) -> DomainResult<bool> {
        let mut records = self.records.write().await;
        Ok(records.remove(phone).is_some())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<PendingOtp>> {
        let records = self.records.read().await;
        Ok(newest_phone_for_email(&records, email).and_then(|phone| records.get(&phone).cloned()))
    }

    async fn attempt_by_email(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Attempt>> {
        let mut records = self.records.write().await;

        let Some(phone) = newest_phone_for_email(&records, email) else {
            return Ok(None);
        };
        let Some(record) = records.get_mut(&phone) else {
            return Ok(None);
        };

        let outcome = record.attempt(code, now);
        if !outcome.retains_record() {
            records.remove(&phone);
        }

        Ok(Some(outcome))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        Ok(before - records.len())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
