//! Pending one-time password issued to a phone and bound to an email address.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Maximum number of failed verification attempts before a code is invalidated
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of a generated code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of an issued code (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// A code waiting to be verified.
///
/// Stored under `phone`; verification looks records up by `email`. Field
/// names serialize in camelCase so external writers can produce the
/// `{ email, code, expiresAt, attempts }` shape directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOtp {
    /// Phone the code was issued to (store key)
    #[serde(default)]
    pub phone: String,

    /// Normalized email the code is bound to
    pub email: String,

    /// The one-time code
    pub code: String,

    /// When the code was issued
    #[serde(default)]
    pub created_at: DateTime<Utc>,

    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Failed verification attempts so far
    #[serde(default)]
    pub attempts: u32,
}

/// Result of applying one submitted code to a pending record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Code matched; the record is consumed
    Verified,
    /// Record was past its expiry; the record is dropped
    Expired,
    /// Wrong code with budget remaining; the record is kept with `attempts + 1`
    Mismatch { attempts_left: u32 },
    /// Wrong code that used up the budget; the record is dropped
    Exhausted,
}

impl Attempt {
    /// Whether the store must keep (and persist) the mutated record
    pub fn retains_record(&self) -> bool {
        matches!(self, Attempt::Mismatch { .. })
    }
}

impl PendingOtp {
    /// Creates a pending record with an explicit code
    pub fn new(
        phone: impl Into<String>,
        email: impl Into<String>,
        code: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            phone: phone.into(),
            email: email.into(),
            code: code.into(),
            created_at: now,
            expires_at: now + ttl,
            attempts: 0,
        }
    }

    /// Creates a pending record with a freshly generated code
    pub fn issue(phone: impl Into<String>, email: impl Into<String>, ttl: Duration) -> Self {
        Self::new(phone, email, Self::generate_code(), ttl)
    }

    /// Generates a 6-digit code from the OS CSPRNG
    pub fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(0..1_000_000);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }

    /// Checks expiry against an explicit instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks expiry against the current time
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Constant-time comparison against a submitted code
    pub fn matches(&self, submitted: &str) -> bool {
        let submitted = submitted.trim();
        submitted.len() == self.code.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Remaining failed attempts before the code is invalidated
    pub fn remaining_attempts(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// Applies one verification attempt at `now`.
    ///
    /// Expiry is checked before the code, so an expired record never counts
    /// an attempt. `attempts` is only incremented on a mismatch.
    pub fn attempt(&mut self, submitted: &str, now: DateTime<Utc>) -> Attempt {
        if self.is_expired_at(now) {
            return Attempt::Expired;
        }

        if self.matches(submitted) {
            return Attempt::Verified;
        }

        self.attempts = self.attempts.saturating_add(1);
        if self.attempts >= MAX_ATTEMPTS {
            Attempt::Exhausted
        } else {
            Attempt::Mismatch {
                attempts_left: self.remaining_attempts(),
            }
        }
    }

    /// Time left before expiry, zero once expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
