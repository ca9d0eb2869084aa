//! Configuration module with concern-specific sub-modules
//!
//! - `cache` - Redis connection settings for the shared OTP store
//! - `environment` - Environment detection and logging configuration
//! - `otp` - OTP store backend, code lifetime and error exposure
//! - `server` - HTTP server and CORS configuration

pub mod cache;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{OtpConfig, StoreBackend};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Redis configuration (used when the OTP store is Redis)
    pub cache: CacheConfig,

    /// OTP configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            cache: CacheConfig::default(),
            otp: OtpConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            cache: CacheConfig::from_env(),
            otp: OtpConfig::from_env(environment),
            logging: LoggingConfig::from_env(environment),
        }
    }
}
