//! Type definitions shared by the server crates

pub mod response;

pub use response::{HealthResponse, HealthStatus};
