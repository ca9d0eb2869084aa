//! Main OTP service implementation

use chrono::Utc;
use std::sync::Arc;

use bo_shared::utils::email::{is_valid_email, mask_email, normalize_email};
use bo_shared::utils::phone::{is_valid_international_phone, mask_phone_number, normalize_phone_number};

use crate::domain::entities::pending_otp::{Attempt, PendingOtp};
use crate::errors::{messages, DomainError, DomainResult, OtpError};
use crate::repositories::otp::OtpStore;

use super::config::OtpServiceConfig;
use super::traits::OtpDelivery;
use super::types::{IssuedOtp, VerifyOutcome};

/// OTP service for issuing and verifying one-time codes
pub struct OtpService<S: OtpStore, D: OtpDelivery> {
    /// Pending code storage
    store: Arc<S>,
    /// Channel used to send codes
    delivery: Arc<D>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S: OtpStore, D: OtpDelivery> OtpService<S, D> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Pending code storage
    /// * `delivery` - Delivery channel implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, delivery: Arc<D>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            delivery,
            config,
        }
    }

    /// Name of the active store backend
    pub fn store_backend(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Issue a code for a phone, bound to an email
    ///
    /// This method:
    /// 1. Validates and normalizes phone and email
    /// 2. Generates a new code, replacing any pending code for the phone
    /// 3. Stores the code
    /// 4. Sends the code through the delivery channel
    ///
    /// A delivery failure removes the stored code again.
    pub async fn issue(&self, phone: &str, email: &str) -> DomainResult<IssuedOtp> {
        let phone = normalize_phone_number(phone);
        if phone.is_empty() {
            return Err(DomainError::validation(messages::PHONE_REQUIRED));
        }
        if !is_valid_international_phone(&phone) {
            return Err(DomainError::validation(messages::INVALID_PHONE));
        }

        let email = normalize_email(email);
        if email.is_empty() {
            return Err(DomainError::validation(messages::EMAIL_REQUIRED));
        }
        if !is_valid_email(&email) {
            return Err(DomainError::validation(messages::INVALID_EMAIL));
        }

        let ttl = self.config.code_ttl().ok_or_else(|| {
            DomainError::internal(format!(
                "Invalid OTP lifetime: {} seconds",
                self.config.code_ttl_seconds
            ))
        })?;

        let otp = PendingOtp::issue(phone.clone(), email.clone(), ttl);
        let expires_at = otp.expires_at;

        self.store.put(otp.clone()).await?;

        let message_id = match self.delivery.deliver(&otp).await {
            Ok(message_id) => message_id,
            Err(reason) => {
                tracing::error!(
                    phone = %mask_phone_number(&phone),
                    channel = self.delivery.channel_name(),
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to deliver OTP"
                );
                if let Err(e) = self.store.delete(&phone).await {
                    tracing::warn!(
                        phone = %mask_phone_number(&phone),
                        error = %e,
                        "Failed to remove undelivered OTP"
                    );
                }
                return Err(DomainError::internal(format!(
                    "Failed to deliver OTP: {}",
                    reason
                )));
            }
        };

        tracing::info!(
            phone = %mask_phone_number(&phone),
            email = %mask_email(&email),
            channel = self.delivery.channel_name(),
            expires_at = %expires_at,
            event = "otp_issued",
            "OTP issued"
        );

        Ok(IssuedOtp {
            phone,
            email,
            expires_at,
            message_id,
        })
    }

    /// Verify a submitted code for an email
    ///
    /// Validation failures never touch the store. The lookup, attempt
    /// accounting and consumption happen atomically inside the store.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyOutcome)` - The code matched and has been consumed
    /// * `Err(DomainError::Validation)` - Missing email or code
    /// * `Err(DomainError::Otp)` - Not found, expired, mismatch or exhausted
    /// * `Err(DomainError::Internal)` - Store failure
    pub async fn verify(&self, email: &str, submitted_code: &str) -> DomainResult<VerifyOutcome> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(DomainError::validation(messages::EMAIL_REQUIRED));
        }

        let code = submitted_code.trim();
        if code.is_empty() {
            return Err(DomainError::validation(messages::OTP_REQUIRED));
        }

        let outcome = self
            .store
            .attempt_by_email(&email, code, Utc::now())
            .await?;

        let masked = mask_email(&email);
        let rejection = match outcome {
            Some(Attempt::Verified) => {
                tracing::info!(email = %masked, event = "otp_verified", "OTP verified");
                return Ok(VerifyOutcome {
                    email,
                    verified: true,
                });
            }
            None => OtpError::NotFound,
            Some(Attempt::Expired) => OtpError::Expired,
            Some(Attempt::Mismatch { attempts_left }) => OtpError::Mismatch { attempts_left },
            Some(Attempt::Exhausted) => OtpError::AttemptsExhausted,
        };

        tracing::warn!(
            email = %masked,
            reason = rejection.code(),
            attempts_left = ?rejection.attempts_left(),
            event = "otp_rejected",
            "OTP verification rejected"
        );

        Err(rejection.into())
    }
}
