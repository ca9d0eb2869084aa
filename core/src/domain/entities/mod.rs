//! Domain entities representing core business objects.

pub mod pending_otp;

// Re-export commonly used types
pub use pending_otp::{Attempt, PendingOtp, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};
