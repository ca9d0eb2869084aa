//! Redis-backed OTP store
//!
//! Layout:
//! - `otp:pending:{phone}` holds the JSON-encoded `PendingOtp`
//! - `otp:email:{email}` is a sorted set of phones scored by `created_at`
//!   (milliseconds), so the newest record for an email is the highest member
//!
//! Keys carry a native TTL, so `purge_expired` has nothing to do. Index
//! members whose record is gone or now bound to another email are skipped on
//! lookup and pruned by the next verification of that email.
//! Verification runs as an optimistic `WATCH`/`MULTI`/`EXEC` transaction on a
//! dedicated connection and is retried when a concurrent writer wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use tracing::{debug, warn};

use bo_core::domain::entities::pending_otp::{Attempt, PendingOtp};
use bo_core::errors::DomainResult;
use bo_core::repositories::otp::OtpStore;
use bo_shared::utils::{mask_email, mask_phone_number};

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Redis key prefix for pending records
const PENDING_KEY_PREFIX: &str = "otp:pending";

/// Redis key prefix for the email index
const EMAIL_KEY_PREFIX: &str = "otp:email";

/// Seconds a record outlives its `expires_at`, so late submissions are
/// answered with "expired" rather than "not found"
const EXPIRED_GRACE_SECONDS: i64 = 60;

/// Optimistic transaction attempts before giving up
const MAX_TRANSACTION_RETRIES: u32 = 10;

/// OTP store on a shared Redis instance
#[derive(Clone)]
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Underlying client, for health checks
    pub fn client(&self) -> &RedisClient {
        &self.client
    }

    fn pending_key(&self, phone: &str) -> String {
        self.client.make_key(&format!("{}:{}", PENDING_KEY_PREFIX, phone))
    }

    fn email_key(&self, email: &str) -> String {
        self.client.make_key(&format!("{}:{}", EMAIL_KEY_PREFIX, email))
    }

    /// Key lifetime for a record, rounded up to whole seconds
    fn ttl_seconds(otp: &PendingOtp, now: DateTime<Utc>) -> u64 {
        let remaining_ms = (otp.expires_at - now).num_milliseconds().max(0);
        let remaining = (remaining_ms + 999) / 1000;
        (remaining + EXPIRED_GRACE_SECONDS).max(1) as u64
    }

    /// Lifetime of the email index: never shorter than any member's record
    fn index_ttl_seconds(current_ttl: i64, record_ttl: u64) -> u64 {
        record_ttl.max(current_ttl.max(0) as u64)
    }

    /// Sorted-set score of a record
    fn index_score(otp: &PendingOtp) -> i64 {
        otp.created_at.timestamp_millis()
    }

    fn decode(raw: &str, phone: &str) -> Result<PendingOtp, InfrastructureError> {
        let mut otp: PendingOtp = serde_json::from_str(raw)?;
        if otp.phone.is_empty() {
            otp.phone = phone.to_string();
        }
        Ok(otp)
    }

    async fn load(&self, phone: &str) -> Result<Option<PendingOtp>, InfrastructureError> {
        match self.client.get(&self.pending_key(phone)).await? {
            Some(raw) => Ok(Some(Self::decode(&raw, phone)?)),
            None => Ok(None),
        }
    }

    async fn store(&self, otp: &PendingOtp) -> Result<(), InfrastructureError> {
        let ttl = Self::ttl_seconds(otp, Utc::now());
        let payload = serde_json::to_string(otp)?;
        let pending_key = self.pending_key(&otp.phone);
        let email_key = self.email_key(&otp.email);

        let mut conn = self.client.dedicated_connection().await?;
        let previous: Option<String> = conn.get(&pending_key).await?;
        let current_index_ttl: i64 = conn.ttl(&email_key).await?;

        let mut pipe = redis::pipe();
        pipe.atomic()
            .cmd("SET")
            .arg(&pending_key)
            .arg(payload)
            .arg("EX")
            .arg(ttl)
            .ignore()
            .cmd("ZADD")
            .arg(&email_key)
            .arg(Self::index_score(otp))
            .arg(&otp.phone)
            .ignore()
            .cmd("EXPIRE")
            .arg(&email_key)
            .arg(Self::index_ttl_seconds(current_index_ttl, ttl))
            .ignore();

        // Re-issuing a phone for another email unbinds it from the old one
        if let Some(raw) = previous {
            if let Ok(old) = Self::decode(&raw, &otp.phone) {
                if old.email != otp.email {
                    pipe.cmd("ZREM")
                        .arg(self.email_key(&old.email))
                        .arg(&otp.phone)
                        .ignore();
                }
            }
        }

        pipe.query_async::<_, ()>(&mut conn).await?;
        Ok(())
    }

    async fn lookup_by_email(&self, email: &str) -> Result<Option<PendingOtp>, InfrastructureError> {
        let phones = self
            .client
            .members_by_score_desc(&self.email_key(email))
            .await?;

        for phone in phones {
            if let Some(otp) = self.load(&phone).await? {
                if otp.email == email {
                    return Ok(Some(otp));
                }
            }
        }
        Ok(None)
    }

    async fn remove(&self, phone: &str) -> Result<bool, InfrastructureError> {
        let pending_key = self.pending_key(phone);
        let mut conn = self.client.dedicated_connection().await?;

        for _ in 0..MAX_TRANSACTION_RETRIES {
            redis::cmd("WATCH")
                .arg(&pending_key)
                .query_async::<_, ()>(&mut conn)
                .await?;

            let raw: Option<String> = conn.get(&pending_key).await?;
            let Some(raw) = raw else {
                redis::cmd("UNWATCH").query_async::<_, ()>(&mut conn).await?;
                return Ok(false);
            };
            let otp = Self::decode(&raw, phone)?;

            let mut pipe = redis::pipe();
            pipe.atomic()
                .del(&pending_key)
                .ignore()
                .cmd("ZREM")
                .arg(self.email_key(&otp.email))
                .arg(phone)
                .ignore();

            let committed: Option<()> = pipe.query_async(&mut conn).await?;
            if committed.is_some() {
                return Ok(true);
            }
            debug!(phone = %mask_phone_number(phone), "OTP delete conflicted, retrying");
        }

        Err(InfrastructureError::Transaction(
            "OTP delete did not commit after repeated conflicts".to_string(),
        ))
    }

    async fn try_attempt(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Attempt>, InfrastructureError> {
        let email_key = self.email_key(email);
        let mut conn = self.client.dedicated_connection().await?;

        for retry in 0..MAX_TRANSACTION_RETRIES {
            redis::cmd("WATCH")
                .arg(&email_key)
                .query_async::<_, ()>(&mut conn)
                .await?;

            let phones: Vec<String> = redis::cmd("ZREVRANGE")
                .arg(&email_key)
                .arg(0)
                .arg(-1)
                .query_async(&mut conn)
                .await?;

            let mut stale = Vec::new();
            let mut target = None;
            for phone in phones {
                let pending_key = self.pending_key(&phone);
                redis::cmd("WATCH")
                    .arg(&pending_key)
                    .query_async::<_, ()>(&mut conn)
                    .await?;

                let raw: Option<String> = conn.get(&pending_key).await?;
                match raw.map(|raw| Self::decode(&raw, &phone)).transpose()? {
                    Some(otp) if otp.email == email => {
                        target = Some((pending_key, otp));
                        break;
                    }
                    _ => stale.push(phone),
                }
            }

            let mut pipe = redis::pipe();
            pipe.atomic();
            if !stale.is_empty() {
                pipe.cmd("ZREM").arg(&email_key).arg(&stale).ignore();
            }

            let outcome = match target {
                Some((pending_key, mut otp)) => {
                    let outcome = otp.attempt(code, now);
                    if outcome.retains_record() {
                        pipe.cmd("SET")
                            .arg(&pending_key)
                            .arg(serde_json::to_string(&otp)?)
                            .arg("KEEPTTL")
                            .ignore();
                    } else {
                        pipe.del(&pending_key)
                            .ignore()
                            .cmd("ZREM")
                            .arg(&email_key)
                            .arg(&otp.phone)
                            .ignore();
                    }
                    Some(outcome)
                }
                None if stale.is_empty() => {
                    redis::cmd("UNWATCH").query_async::<_, ()>(&mut conn).await?;
                    return Ok(None);
                }
                None => None,
            };

            let committed: Option<()> = pipe.query_async(&mut conn).await?;
            if committed.is_some() {
                return Ok(outcome);
            }

            debug!(
                email = %mask_email(email),
                retry,
                "OTP verification transaction conflicted, retrying"
            );
        }

        warn!(
            email = %mask_email(email),
            "OTP verification transaction gave up after repeated conflicts"
        );
        Err(InfrastructureError::Transaction(
            "OTP verification did not commit after repeated conflicts".to_string(),
        ))
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, otp: PendingOtp) -> DomainResult<()> {
        Ok(self.store(&otp).await?)
    }

    async fn get(&self, phone: &str) -> DomainResult<Option<PendingOtp>> {
        Ok(self.load(phone).await?)
    }

    async fn delete(&self, phone: &str) -> DomainResult<bool> {
        Ok(self.remove(phone).await?)
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<PendingOtp>> {
        Ok(self.lookup_by_email(email).await?)
    }

    async fn attempt_by_email(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Attempt>> {
        Ok(self.try_attempt(email, code, now).await?)
    }

    async fn purge_expired(&self, _now: DateTime<Utc>) -> DomainResult<usize> {
        Ok(0)
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
