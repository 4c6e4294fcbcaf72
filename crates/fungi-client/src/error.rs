//! Error types for prediction client operations

use thiserror::Error;

/// Result type alias for prediction client operations
pub type Result<T> = std::result::Result<T, PredictError>;

/// Errors that can occur while talking to the prediction service
#[derive(Error, Debug)]
pub enum PredictError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Service returned a non-success status with an error body
    #[error("Prediction service rejected the upload (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body did not match the documented shape
    #[error("Malformed response from prediction service: {0}")]
    MalformedResponse(String),
}

impl PredictError {
    /// Create a rejection error from status code and server-supplied message
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Whether this error is a transport-level failure rather than an
    /// explicit rejection by the service.
    ///
    /// Transport failures carry no user-presentable server text; callers
    /// should surface a generic message and log the cause instead.
    pub fn is_transport_failure(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }
}
