//! OTP route handlers
//!
//! - `POST /send-otp` issues a code to a phone
//! - `POST /verify-otp` verifies a code by email

pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use bo_core::repositories::otp::OtpStore;
use bo_core::services::otp::{OtpDelivery, OtpService};

/// Shared state for the OTP handlers
pub struct AppState<S: OtpStore, D: OtpDelivery> {
    pub otp_service: Arc<OtpService<S, D>>,
    /// Include internal error text in 500 responses
    pub expose_error_details: bool,
}

impl<S: OtpStore, D: OtpDelivery> AppState<S, D> {
    pub fn new(otp_service: Arc<OtpService<S, D>>, expose_error_details: bool) -> Self {
        Self {
            otp_service,
            expose_error_details,
        }
    }
}
