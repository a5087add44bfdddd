//! Domain errors.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Validation failures of value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("unknown sender policy '{0}' (expected 'bound' or 'trusting')")]
    UnknownSenderPolicy(String),
}

/// Failures the relay reports back to a client.
///
/// None of these is ever broadcast: channel errors go to the offending
/// connection only, upload errors to the uploading HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Join with an empty or missing display name
    #[error("display name must not be empty")]
    InvalidJoin,

    /// Chat, file notice or signaling from a connection that has not joined
    #[error("connection '{0}' has not joined the chat")]
    UnknownSender(ConnectionId),

    /// Text frame that is not a known event with the required fields
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    /// The uploaded file could not be stored
    #[error("upload failed: {0}")]
    UploadFailure(String),
}

impl RelayError {
    /// Stable identifier sent to clients in the `error` event.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJoin => "invalidJoin",
            Self::UnknownSender(_) => "unknownSender",
            Self::MalformedEvent(_) => "malformedEvent",
            Self::UploadFailure(_) => "uploadFailure",
        }
    }
}

/// Errors that can occur when pushing messages to clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not connected")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode event: {0}")]
    Encode(String),
}

/// Errors raised by file storage backends
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A file with the requested name already exists
    #[error("file '{0}' already exists")]
    AlreadyExists(String),

    #[error("storage I/O error: {0}")]
    Io(String),
}
