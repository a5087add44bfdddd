//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay URL could not be used
    #[error("Invalid server URL '{0}': {1}")]
    InvalidUrl(String, String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The upload was rejected or could not be sent
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
