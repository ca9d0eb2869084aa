//! Shared utilities and common types for the back-office OTP service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Email and phone normalization, validation and masking
//! - Response structures shared by HTTP surfaces

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, CorsConfig, Environment, LogFormat, LoggingConfig, OtpConfig,
    ServerConfig, StoreBackend,
};
pub use types::{HealthResponse, HealthStatus};
pub use utils::{email, phone};
