//! OTP store trait defining the interface for pending code persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::pending_otp::{Attempt, PendingOtp};
use crate::errors::DomainResult;

/// Storage port for pending OTP records.
///
/// Records are keyed by phone. Lookups for verification go by the
/// normalized email stored inside the record.
///
/// # Concurrency
/// `attempt_by_email` must be atomic with respect to every other call on
/// the same record: two concurrent correct submissions yield exactly one
/// `Attempt::Verified`, and concurrent mismatches never lose an increment.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Insert or overwrite the record for `otp.phone`
    async fn put(&self, otp: PendingOtp) -> DomainResult<()>;

    /// Fetch the record stored for a phone
    async fn get(&self, phone: &str) -> DomainResult<Option<PendingOtp>>;

    /// Remove the record for a phone, returning whether one existed
    async fn delete(&self, phone: &str) -> DomainResult<bool>;

    /// Find the record bound to an email.
    ///
    /// When several phones carry the same email the most recently created
    /// record wins.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<PendingOtp>>;

    /// Locate the record for `email`, apply `PendingOtp::attempt` and persist
    /// the result as a single atomic step.
    ///
    /// Returns `Ok(None)` when no record is bound to the email. A record is
    /// kept (with its incremented counter) only for `Attempt::Mismatch`;
    /// every other outcome removes it.
    async fn attempt_by_email(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<Attempt>>;

    /// Remove every record expired at `now`, returning how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> DomainResult<usize>;

    /// Short backend name for health and logs
    fn backend_name(&self) -> &'static str;
}
