//! Response types shared across HTTP surfaces

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Server version
    pub version: String,

    /// Active OTP store backend
    pub store: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    /// Healthy response stamped with the current time
    pub fn healthy(
        service: impl Into<String>,
        version: impl Into<String>,
        store: impl Into<String>,
    ) -> Self {
        Self {
            status: HealthStatus::Healthy,
            service: service.into(),
            version: version.into(),
            store: store.into(),
            timestamp: Utc::now(),
        }
    }
}
