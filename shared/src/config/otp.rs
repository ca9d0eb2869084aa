//! OTP store and verification configuration

use serde::{Deserialize, Serialize};
use std::env;

use super::environment::Environment;

/// Which backend holds pending OTP records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local map; valid for single-instance deployments only
    #[default]
    Memory,
    /// Shared Redis instance with native key TTL
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "mem" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            _ => Err(format!("Invalid OTP store backend: {}", s)),
        }
    }
}

/// OTP configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Store backend
    #[serde(default)]
    pub store: StoreBackend,

    /// Lifetime of an issued code in seconds
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: i64,

    /// Interval between expiry sweeps in seconds (0 disables the sweeper)
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Include the underlying error text in 500 responses
    #[serde(default = "default_expose_error_details")]
    pub expose_error_details: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            code_ttl_seconds: default_code_ttl_seconds(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            expose_error_details: default_expose_error_details(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables, with production hiding error details by default
    pub fn from_env(environment: Environment) -> Self {
        let store = env::var("OTP_STORE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let code_ttl_seconds = parse_code_ttl(env::var("OTP_CODE_TTL_SECONDS").ok().as_deref());
        let sweep_interval_seconds = env::var("OTP_SWEEP_INTERVAL_SECONDS")
            .ok()
            .and_then(|i| i.parse().ok())
            .unwrap_or_else(default_sweep_interval_seconds);
        let expose_error_details = env::var("OTP_EXPOSE_ERROR_DETAILS")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(!environment.is_production());

        Self {
            store,
            code_ttl_seconds,
            sweep_interval_seconds,
            expose_error_details,
        }
    }

    /// Whether the background sweeper should run
    pub fn sweeper_enabled(&self) -> bool {
        self.sweep_interval_seconds > 0
    }
}

/// Longest accepted code lifetime
const MAX_CODE_TTL_SECONDS: i64 = 86_400;

/// Code lifetime from its raw setting; unparsable or out-of-range values fall back to the default
fn parse_code_ttl(value: Option<&str>) -> i64 {
    value
        .and_then(|t| t.trim().parse().ok())
        .filter(|t: &i64| (1..=MAX_CODE_TTL_SECONDS).contains(t))
        .unwrap_or_else(default_code_ttl_seconds)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn default_code_ttl_seconds() -> i64 {
    300 // 5 minutes
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_expose_error_details() -> bool {
    true
}
