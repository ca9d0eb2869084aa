//! # OTP Core
//!
//! Domain layer for the OTP verification service: the pending code entity,
//! the error taxonomy, the store port with its in-memory backend, and the
//! issuance and verification service.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Attempt, PendingOtp, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};
pub use errors::{messages, DomainError, DomainResult, OtpError};
pub use repositories::{InMemoryOtpStore, OtpStore};
pub use services::{
    IssuedOtp, OtpDelivery, OtpService, OtpServiceConfig, OtpSweeper, SweepResult, VerifyOutcome,
};
