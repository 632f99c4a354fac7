use std::time::Duration;
use thiserror::Error;

/// Error taxonomy for ORCID registry access
///
/// Four kinds are surfaced to callers and must be handled distinctly:
/// invalid input (detected before any I/O), bounds violations (detected
/// before any I/O), HTTP-status failures (after a response arrived) and
/// timeouts (no response within the configured window). None of them are
/// retried internally.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (detected synchronously, no I/O attempted)
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    // Bounds errors (detected synchronously, no I/O attempted)
    #[error("Too many put codes in one bulk request: {count} exceeds limit of {limit}")]
    TooManyPutCodes { count: usize, limit: usize },

    // Transport errors (a response was received but was not a success)
    #[error("Registry returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Timeout error: operation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    // Underlying HTTP client failures (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    // Parse errors (only for structurally unusable payloads)
    #[error("Parse error in {context}: {message}")]
    Parse { context: String, message: String },
}

impl Error {
    /// Check if the error is a timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the error was raised before any network I/O
    pub fn is_pre_request(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::TooManyPutCodes { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
