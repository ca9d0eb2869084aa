//! OTP verification error types and the user-facing messages they carry.

use thiserror::Error;

/// User-facing validation messages
pub mod messages {
    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const OTP_REQUIRED: &str = "OTP is required";
    pub const PHONE_REQUIRED: &str = "Phone is required";
    pub const INVALID_PHONE: &str = "Invalid phone number format";
    pub const INVALID_EMAIL: &str = "Invalid email format";
}

/// Rejections produced by a verification attempt.
///
/// The display strings are returned verbatim to clients.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP not found or expired. Please request a new OTP.")]
    NotFound,

    #[error("OTP has expired. Please request a new OTP.")]
    Expired,

    #[error("Invalid OTP. Please try again.")]
    Mismatch { attempts_left: u32 },

    #[error("Too many failed attempts. Please request a new OTP.")]
    AttemptsExhausted,
}

impl OtpError {
    /// Stable machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::NotFound => "OTP_NOT_FOUND",
            OtpError::Expired => "OTP_EXPIRED",
            OtpError::Mismatch { .. } => "OTP_MISMATCH",
            OtpError::AttemptsExhausted => "OTP_ATTEMPTS_EXHAUSTED",
        }
    }

    /// Remaining attempts, only reported for a mismatch
    pub fn attempts_left(&self) -> Option<u32> {
        match self {
            OtpError::Mismatch { attempts_left } => Some(*attempts_left),
            _ => None,
        }
    }
}
