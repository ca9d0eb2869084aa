//! OTP delivery channels
//!
//! Only a mock channel ships with the service; a real SMS or email provider
//! plugs in by implementing `bo_core::services::otp::OtpDelivery`.

pub mod mock;

pub use mock::MockOtpDelivery;
