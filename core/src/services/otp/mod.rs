//! OTP service module
//!
//! This module provides the one-time password workflow:
//! - Code issuance and delivery to a phone
//! - Verification by email with a bounded attempt budget
//! - Background sweeping of expired codes

mod config;
mod service;
mod sweeper;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use sweeper::{OtpSweeper, SweepResult};
pub use traits::OtpDelivery;
pub use types::{IssuedOtp, VerifyOutcome};
