use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

/// Failure envelope shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts_left: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: true,
            message: message.into(),
            attempts_left: None,
            details: None,
        }
    }

    pub fn with_attempts_left(mut self, attempts_left: Option<u32>) -> Self {
        self.attempts_left = attempts_left;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(ErrorResponse::new("OTP is required")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "OTP is required");
        assert!(json.get("attemptsLeft").is_none());
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_attempts_left_is_camel_case() {
        let response = ErrorResponse::new("Invalid OTP. Please try again.").with_attempts_left(Some(2));
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["attemptsLeft"], 2);
    }
}
