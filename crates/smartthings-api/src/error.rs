//! Error types for the SmartThings API surface

use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors reported by a `DeviceApi` transport
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The cloud rejected the command
    #[error("command rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The device is unknown to the cloud
    #[error("device not found: {0}")]
    DeviceNotFound(String),
}
