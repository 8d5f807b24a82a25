//! Error Types for the Analytics Client
//!
//! Every external failure ends up as an [`ApiError`]; [`ApiError::kind`]
//! folds it into the dialog's [`ErrorKind`] taxonomy.

use thiserror::Error;
use vybe_core::ErrorKind;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, DNS, TLS, or body-read failure
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    /// 400 or 404: the address, mint, or program does not exist
    #[error("Not found (HTTP {0})")]
    NotFound(u16),

    /// 403
    #[error("Access denied (HTTP 403)")]
    AccessDenied,

    /// Any other non-2xx status
    #[error("Unexpected status: HTTP {0}")]
    Status(u16),

    /// Body is not JSON or not the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Classify an HTTP status that is not a success
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 404 => ApiError::NotFound(status),
            403 => ApiError::AccessDenied,
            other => ApiError::Status(other),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) | ApiError::Timeout | ApiError::Status(_) | ApiError::Config(_) => {
                ErrorKind::Network
            }
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::AccessDenied => ErrorKind::AccessDenied,
            ApiError::Malformed(_) => ErrorKind::MalformedResponse,
        }
    }

    /// Scrubbed, kind-tagged text safe to show a user
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Timeout => "⏱️ Timeout: Server took too long to respond.",
            ApiError::NotFound(_) => "🔍 Not Found: no such address.",
            ApiError::AccessDenied => "🚫 Forbidden (403): This resource is not accessible.",
            ApiError::Malformed(_) => "❌ Failed to parse JSON response.",
            ApiError::Network(_) | ApiError::Status(_) | ApiError::Config(_) => {
                "❌ Network error occurred. Please try again later."
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}
