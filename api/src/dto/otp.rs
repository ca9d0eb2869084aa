use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Body of `POST /verify-otp`.
///
/// Both fields may be absent; the service answers with the matching
/// validation message. `otp` accepts a JSON number as well as a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub otp: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Unsigned(n) => n.to_string(),
            StringOrNumber::Signed(n) => n.to_string(),
        }),
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub verified: bool,
}

impl VerifyOtpResponse {
    pub fn verified() -> Self {
        Self {
            success: true,
            message: "OTP verified successfully".to_string(),
            verified: true,
        }
    }
}

/// Body of `POST /send-otp`. Presence and shape are checked by the service;
/// the length bounds only reject oversized input early.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[serde(default)]
    #[validate(length(max = 32, message = "Invalid phone number format"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(max = 254, message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    /// Seconds until the issued code expires
    pub expires_in: i64,
}

impl SendOtpResponse {
    pub fn sent(expires_in: i64) -> Self {
        Self {
            success: true,
            message: "OTP sent successfully".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_accepts_string_otp() {
        let req: VerifyOtpRequest =
            serde_json::from_str(r#"{"email":"u@x.com","otp":"482913"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("u@x.com"));
        assert_eq!(req.otp.as_deref(), Some("482913"));
    }

    #[test]
    fn test_verify_request_accepts_numeric_otp() {
        let req: VerifyOtpRequest =
            serde_json::from_str(r#"{"email":"u@x.com","otp":482913}"#).unwrap();
        assert_eq!(req.otp.as_deref(), Some("482913"));
    }

    #[test]
    fn test_verify_request_missing_fields() {
        let req: VerifyOtpRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.otp.is_none());

        let req: VerifyOtpRequest = serde_json::from_str(r#"{"otp":null}"#).unwrap();
        assert!(req.otp.is_none());
    }

    #[test]
    fn test_verify_request_rejects_other_otp_types() {
        assert!(serde_json::from_str::<VerifyOtpRequest>(r#"{"otp":[1,2]}"#).is_err());
        assert!(serde_json::from_str::<VerifyOtpRequest>(r#"{"otp":true}"#).is_err());
    }

    #[test]
    fn test_send_request_length_bounds() {
        let ok = SendOtpRequest {
            phone: "+966501234567".to_string(),
            email: "u@x.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        let too_long = SendOtpRequest {
            phone: "1".repeat(40),
            email: "u@x.com".to_string(),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_response_shapes() {
        let json = serde_json::to_value(VerifyOtpResponse::verified()).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["verified"], true);
        assert_eq!(json["message"], "OTP verified successfully");

        let json = serde_json::to_value(SendOtpResponse::sent(300)).unwrap();
        assert_eq!(json["expiresIn"], 300);
    }
}
