//! Mock delivery channel
//!
//! Records that a code was sent and returns a synthetic message id. The code
//! itself never reaches the logs.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use bo_core::domain::entities::pending_otp::PendingOtp;
use bo_core::services::otp::OtpDelivery;
use bo_shared::utils::{mask_email, mask_phone_number};

use crate::InfrastructureError;

/// Mock delivery channel for development and testing
#[derive(Clone, Default)]
pub struct MockOtpDelivery {
    /// Counter for tracking number of codes sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockOtpDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a channel that fails every delivery
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Total number of codes sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    async fn send(&self, otp: &PendingOtp) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(&otp.phone);

        if self.simulate_failure {
            warn!(phone = %masked_phone, "Mock delivery simulating failure");
            return Err(InfrastructureError::Delivery(
                "Simulated delivery failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "otp_delivery",
            provider = "mock",
            phone = %masked_phone,
            email = %mask_email(&otp.email),
            message_id = %message_id,
            count,
            "OTP sent (mock)"
        );

        Ok(message_id)
    }
}

#[async_trait]
impl OtpDelivery for MockOtpDelivery {
    async fn deliver(&self, otp: &PendingOtp) -> Result<String, String> {
        self.send(otp).await.map_err(|e| e.to_string())
    }

    fn channel_name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn otp() -> PendingOtp {
        PendingOtp::new("+966501234567", "u@x.com", "482913", Duration::minutes(5))
    }

    #[tokio::test]
    async fn test_deliver_returns_message_id() {
        let delivery = MockOtpDelivery::new();
        let message_id = delivery.deliver(&otp()).await.unwrap();

        assert!(message_id.starts_with("mock_"));
        assert_eq!(delivery.message_count(), 1);
    }

    #[tokio::test]
    async fn test_counter_is_shared_between_clones() {
        let delivery = MockOtpDelivery::new();
        let clone = delivery.clone();

        delivery.deliver(&otp()).await.unwrap();
        clone.deliver(&otp()).await.unwrap();

        assert_eq!(delivery.message_count(), 2);
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let delivery = MockOtpDelivery::failing();
        let err = delivery.deliver(&otp()).await.unwrap_err();

        assert!(err.contains("Simulated delivery failure"));
        assert_eq!(delivery.message_count(), 0);
    }
}
