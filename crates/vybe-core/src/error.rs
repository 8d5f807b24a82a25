//! Error Types
//!
//! Two layers live here. [`ErrorKind`] is the user-facing taxonomy every
//! terminal failure is reduced to before the dialog sees it. [`BotError`]
//! covers the bot's own infrastructure (configuration, chart artifacts,
//! rendering) and never reaches a user verbatim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bot infrastructure operations
pub type Result<T> = std::result::Result<T, BotError>;

/// Failure taxonomy shared by the gateway and the dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input rejected by a step validator or a gateway business rule
    Validation,

    /// Address, mint, or program does not exist
    NotFound,

    /// Explicit 403-style refusal
    AccessDenied,

    /// Transport failure, timeout, or unexpected upstream status
    Network,

    /// Response body did not match the expected JSON shape
    MalformedResponse,

    /// Well-formed but empty result
    NoData,
}

impl ErrorKind {
    /// Whether the user may simply retry the same input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorKind::Validation)
    }

    /// Informational outcomes are reported without an error tone
    pub fn is_informational(&self) -> bool {
        matches!(self, ErrorKind::NoData)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::Network => "network",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::NoData => "no_data",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Infrastructure errors
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chart backend failed or returned something unusable
    #[error("Chart rendering failed: {0}")]
    ChartRender(String),

    /// Chart backend did not answer in time
    #[error("Chart rendering timed out")]
    ChartTimeout,

    /// Temp file for a chart could not be written
    #[error("Chart artifact error: {0}")]
    Artifact(#[from] std::io::Error),
}

impl BotError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            BotError::ChartRender(_) | BotError::ChartTimeout | BotError::Artifact(_) => {
                "⚠️ Error while generating or sending chart.".into()
            }
            BotError::Config(_) => "⚠️ The bot is misconfigured. Please try again later.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_validation_is_recoverable() {
        assert!(ErrorKind::Validation.is_recoverable());
        for kind in [
            ErrorKind::NotFound,
            ErrorKind::AccessDenied,
            ErrorKind::Network,
            ErrorKind::MalformedResponse,
            ErrorKind::NoData,
        ] {
            assert!(!kind.is_recoverable(), "{kind} should be terminal");
        }
    }

    #[test]
    fn test_user_message_hides_detail() {
        let err = BotError::ChartRender("upstream said 502 at 10.0.0.7".into());
        assert!(!err.user_message().contains("10.0.0.7"));
    }
}
