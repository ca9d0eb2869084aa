//! Delivery channel integration

use async_trait::async_trait;

use crate::domain::entities::pending_otp::PendingOtp;

/// Channel that carries an issued code to its recipient
#[async_trait]
pub trait OtpDelivery: Send + Sync {
    /// Deliver the code, returning a provider message id
    async fn deliver(&self, otp: &PendingOtp) -> Result<String, String>;
    /// Channel name for logs
    fn channel_name(&self) -> &'static str;
}
