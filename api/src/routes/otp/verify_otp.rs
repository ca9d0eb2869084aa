use actix_web::{web, HttpResponse};

use bo_core::repositories::otp::OtpStore;
use bo_core::services::otp::OtpDelivery;

use crate::dto::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::error::{handle_domain_error, Operation};

use super::AppState;

/// Handler for POST /verify-otp
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "otp": "482913" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "OTP verified successfully", "verified": true }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing email or otp, unknown, expired, wrong or exhausted code
///   (`attemptsLeft` is present for a wrong code)
/// - 500 Internal Server Error: store failure
pub async fn verify_otp<S, D>(
    state: web::Data<AppState<S, D>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    D: OtpDelivery + 'static,
{
    let request = request.into_inner();
    let email = request.email.unwrap_or_default();
    let otp = request.otp.unwrap_or_default();

    match state.otp_service.verify(&email, &otp).await {
        Ok(_) => HttpResponse::Ok().json(VerifyOtpResponse::verified()),
        Err(error) => handle_domain_error(error, Operation::VerifyOtp, state.expose_error_details),
    }
}
