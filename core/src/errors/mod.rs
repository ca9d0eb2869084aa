//! Domain-specific error types and error handling.

mod types;


pub use types::{messages, OtpError};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed or missing caller input
    #[error("{message}")]
    Validation { message: String },

    /// Store or delivery failure
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Whether the error is caused by the caller (4xx) rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Internal { .. })
    }

    /// Remaining attempts for a mismatch rejection
    pub fn attempts_left(&self) -> Option<u32> {
        match self {
            DomainError::Otp(err) => err.attempts_left(),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
