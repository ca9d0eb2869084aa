pub mod error;
pub mod otp;

pub use error::ErrorResponse;
pub use otp::{SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
