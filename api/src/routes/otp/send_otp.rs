use actix_web::{http::StatusCode, web, HttpResponse};
use validator::{Validate, ValidationErrors};

use bo_core::repositories::otp::OtpStore;
use bo_core::services::otp::OtpDelivery;

use crate::dto::{ErrorResponse, SendOtpRequest, SendOtpResponse};
use crate::handlers::error::{handle_domain_error, Operation};

use super::AppState;

/// Handler for POST /send-otp
///
/// Issues a fresh code for the phone, bound to the email, replacing any code
/// still pending for that phone. The code itself is never returned.
///
/// # Request Body
///
/// ```json
/// { "phone": "+966501234567", "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "OTP sent successfully", "expiresIn": 300 }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing or malformed phone or email
/// - 500 Internal Server Error: store or delivery failure
pub async fn send_otp<S, D>(
    state: web::Data<AppState<S, D>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    D: OtpDelivery + 'static,
{
    if let Err(errors) = request.validate() {
        return ErrorResponse::new(first_validation_message(&errors))
            .to_response(StatusCode::BAD_REQUEST);
    }

    match state.otp_service.issue(&request.phone, &request.email).await {
        Ok(issued) => HttpResponse::Ok().json(SendOtpResponse::sent(issued.expires_in_seconds())),
        Err(error) => handle_domain_error(error, Operation::SendOtp, state.expose_error_details),
    }
}

/// Message of the first failing field, phone before email
fn first_validation_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    ["phone", "email"]
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request body".to_string())
}
