//! Business services

pub mod otp;

pub use otp::{IssuedOtp, OtpDelivery, OtpService, OtpServiceConfig, OtpSweeper, SweepResult, VerifyOutcome};
