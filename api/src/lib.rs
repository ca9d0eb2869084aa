//! HTTP surface for OTP issuance and verification

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod telemetry;
