//! Analyzer error types.

use thiserror::Error;

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Errors that can occur while analyzing an image.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("AWS Rekognition not available")]
    NotAvailable,

    #[error("Failed to configure Rekognition client: {0}")]
    ConfigError(String),

    #[error("Invalid image payload: {0}")]
    InvalidImage(String),

    #[error("Rekognition request failed: {0}")]
    RemoteService(String),
}

impl AnalyzerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    pub fn remote_service(msg: impl Into<String>) -> Self {
        Self::RemoteService(msg.into())
    }

    /// Response lacking a required field.
    pub fn malformed_response(field: &str) -> Self {
        Self::RemoteService(format!("malformed response: missing {}", field))
    }
}

impl From<base64::DecodeError> for AnalyzerError {
    fn from(e: base64::DecodeError) -> Self {
        Self::InvalidImage(e.to_string())
    }
}
