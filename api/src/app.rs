//! Application factory
//!
//! Builds the Actix-web application: middleware, JSON extraction settings
//! and the OTP routes.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use bo_core::repositories::otp::OtpStore;
use bo_core::services::otp::OtpDelivery;
use bo_shared::config::CorsConfig;
use bo_shared::types::HealthResponse;

use crate::dto::ErrorResponse;
use crate::middleware::cors::create_cors;
use crate::routes::otp::{send_otp::send_otp, verify_otp::verify_otp, AppState};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "otp-verification-api";

/// Create and configure the application with all dependencies
pub fn create_app<S, D>(
    app_state: web::Data<AppState<S, D>>,
    cors_config: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpStore + 'static,
    D: OtpDelivery + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config(max_payload_size))
        // Order matters: CORS runs inside the request span
        .wrap(create_cors(cors_config))
        .wrap(TracingLogger::default())
        .configure(configure_routes::<S, D>)
        .default_service(web::route().to(not_found))
}

/// Register the OTP and health routes
pub fn configure_routes<S, D>(cfg: &mut web::ServiceConfig)
where
    S: OtpStore + 'static,
    D: OtpDelivery + 'static,
{
    cfg.route("/health", web::get().to(health_check::<S, D>))
        .route("/send-otp", web::post().to(send_otp::<S, D>))
        .route("/verify-otp", web::post().to(verify_otp::<S, D>));
}

/// JSON extractor settings; malformed bodies get the failure envelope
pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected request body");
            let response =
                ErrorResponse::new("Invalid request body").to_response(StatusCode::BAD_REQUEST);
            InternalError::from_response(err, response).into()
        })
}

/// Health check endpoint handler
async fn health_check<S, D>(state: web::Data<AppState<S, D>>) -> HttpResponse
where
    S: OtpStore + 'static,
    D: OtpDelivery + 'static,
{
    HttpResponse::Ok().json(HealthResponse::healthy(
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        state.otp_service.store_backend(),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new("The requested resource was not found").to_response(StatusCode::NOT_FOUND)
}
