//! # Infrastructure Layer
//!
//! Concrete adapters behind the ports defined in `bo_core`:
//! - **Cache**: Redis client and the Redis-backed `OtpStore`
//! - **Delivery**: OTP delivery channels
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis store (default)

use bo_core::errors::DomainError;

/// Cache module - Redis client and OTP store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Delivery module - channels that carry codes to recipients
pub mod delivery;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Optimistic transaction kept conflicting
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Delivery channel error
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
