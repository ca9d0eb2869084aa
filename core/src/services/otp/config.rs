//! Configuration for the OTP service

use chrono::{Duration, Utc};

use crate::domain::entities::pending_otp::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Lifetime of an issued code in seconds
    pub code_ttl_seconds: i64,
}

impl OtpServiceConfig {
    pub fn new(code_ttl_seconds: i64) -> Self {
        Self { code_ttl_seconds }
    }

    /// Code lifetime as a duration, `None` when it is not positive or would
    /// push the expiry past the representable range
    pub fn code_ttl(&self) -> Option<Duration> {
        Duration::try_seconds(self.code_ttl_seconds)
            .filter(|ttl| *ttl > Duration::zero())
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
    }
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_EXPIRATION_MINUTES * 60,
        }
    }
}
