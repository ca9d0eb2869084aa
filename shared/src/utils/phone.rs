//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{7,14}$").expect("valid phone regex"));

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_international_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INTERNATIONAL_PHONE_REGEX.is_match(&normalized)
}

/// Mask a phone number for logs, keeping the last four digits
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("+966 50-123 4567"), "+966501234567");
        assert_eq!(normalize_phone_number("(050) 123-4567"), "0501234567");
    }

    #[test]
    fn test_is_valid_international_phone() {
        assert!(is_valid_international_phone("+966501234567"));
        assert!(is_valid_international_phone("+92 300 1234567"));
        assert!(is_valid_international_phone("+14155552671"));
        assert!(!is_valid_international_phone("0501234567")); // Missing +
        assert!(!is_valid_international_phone("+0123456789")); // Invalid country code
        assert!(!is_valid_international_phone("+1234")); // Too short
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+966501234567"), "***4567");
        assert_eq!(mask_phone_number("123"), "****");
    }
}
