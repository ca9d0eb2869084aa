//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
});

/// Canonical form used for storage and lookup: trimmed and lower-cased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic shape check on an already-normalized address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask an email address for logs (e.g. `j***@example.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Foo@Bar.com  "), "foo@bar.com");
        assert_eq!(normalize_email("u@x.com"), "u@x.com");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("u@x.com"));
        assert!(is_valid_email("first.last+tag@agency.co.uk"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two words@x.com"));
        assert!(!is_valid_email("u@localhost"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("jane@example.com"), "j***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("invalid"), "***");
    }
}
