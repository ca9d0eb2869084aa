//! Periodic removal of expired pending codes
//!
//! Expired records are already rejected lazily on verification; the sweeper
//! keeps stores without native expiry from accumulating dead entries.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::otp::OtpStore;

/// Background sweeper over an OTP store
pub struct OtpSweeper<S: OtpStore + 'static> {
    store: Arc<S>,
    interval_seconds: u64,
}

impl<S: OtpStore> OtpSweeper<S> {
    /// Create a sweeper; an interval of 0 disables the background task
    pub fn new(store: Arc<S>, interval_seconds: u64) -> Self {
        Self {
            store,
            interval_seconds,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_seconds > 0
    }

    /// Run a single sweep cycle
    pub async fn run_once(&self) -> DomainResult<SweepResult> {
        let purged = self.store.purge_expired(Utc::now()).await?;
        if purged > 0 {
            info!(purged, backend = self.store.backend_name(), "Purged expired OTPs");
        } else {
            debug!(backend = self.store.backend_name(), "No expired OTPs to purge");
        }
        Ok(SweepResult { purged })
    }

    /// Start the sweeper as a background task
    ///
    /// Returns `None` when the sweeper is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.is_enabled() {
            warn!("OTP sweeper is disabled");
            return None;
        }

        let period = Duration::from_secs(self.interval_seconds);

        Some(tokio::spawn(async move {
            info!(
                "OTP sweeper started - will run every {} seconds",
                self.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(period);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_once().await {
                    error!("OTP sweep cycle failed: {}", e);
                }
            }
        }))
    }
}

/// Result of a sweep cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired records removed
    pub purged: usize,
}
