//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    /// Normalized phone the code was sent to
    pub phone: String,
    /// Normalized email the code is bound to
    pub email: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Message id reported by the delivery channel
    pub message_id: String,
}

impl IssuedOtp {
    /// Seconds until expiry, never negative
    pub fn expires_in_seconds(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds().max(0)
    }
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Normalized email that was verified
    pub email: String,
    pub verified: bool,
}
