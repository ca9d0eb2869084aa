//! Mapping from domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse};

use bo_core::errors::DomainError;

use crate::dto::ErrorResponse;

/// Endpoint an error surfaced from; selects the generic 500 message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    VerifyOtp,
    SendOtp,
}

impl Operation {
    fn internal_message(self) -> &'static str {
        match self {
            Operation::VerifyOtp => "Internal server error while verifying OTP",
            Operation::SendOtp => "Internal server error while sending OTP",
        }
    }
}

/// Convert a domain error into the failure envelope.
///
/// Validation and OTP rejections become 400 with their own message.
/// Internal failures become 500 with a fixed message; the underlying text is
/// attached as `details` only when `expose_details` is set.
pub fn handle_domain_error(
    error: DomainError,
    operation: Operation,
    expose_details: bool,
) -> HttpResponse {
    match error {
        DomainError::Internal { message } => {
            tracing::error!(
                operation = ?operation,
                error = %message,
                "Internal error while handling OTP request"
            );

            let mut response = ErrorResponse::new(operation.internal_message());
            if expose_details {
                response = response.with_details(message);
            }
            response.to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
        error => ErrorResponse::new(error.to_string())
            .with_attempts_left(error.attempts_left())
            .to_response(StatusCode::BAD_REQUEST),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use bo_core::errors::OtpError;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_validation_error_is_bad_request() {
        let response = handle_domain_error(
            DomainError::validation("Email is required"),
            Operation::VerifyOtp,
            true,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Email is required");
        assert!(json.get("attemptsLeft").is_none());
    }

    #[actix_web::test]
    async fn test_mismatch_carries_attempts_left() {
        let response = handle_domain_error(
            OtpError::Mismatch { attempts_left: 2 }.into(),
            Operation::VerifyOtp,
            true,
        );
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Invalid OTP. Please try again.");
        assert_eq!(json["attemptsLeft"], 2);
    }

    #[actix_web::test]
    async fn test_internal_error_details_gate() {
        let exposed = handle_domain_error(
            DomainError::internal("connection refused"),
            Operation::VerifyOtp,
            true,
        );
        assert_eq!(exposed.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(exposed).await;
        assert_eq!(json["message"], "Internal server error while verifying OTP");
        assert_eq!(json["details"], "connection refused");

        let hidden = handle_domain_error(
            DomainError::internal("connection refused"),
            Operation::SendOtp,
            false,
        );
        let json = body_json(hidden).await;
        assert_eq!(json["message"], "Internal server error while sending OTP");
        assert!(json.get("details").is_none());
    }
}
