//! Cache module for Redis-based OTP storage
//!
//! Provides a Redis client with retry logic and the `OtpStore`
//! implementation built on it.

pub mod redis_client;
pub mod redis_store;


pub use redis_client::RedisClient;
pub use redis_store::RedisOtpStore;

// Re-export commonly used types
pub use bo_shared::config::CacheConfig;
