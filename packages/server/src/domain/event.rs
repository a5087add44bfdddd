//! Events flowing through the relay.

use super::{
    entity::{ChatMessage, FileNotice, PresenceSnapshot, SignalMessage},
    error::RelayError,
    value_object::{Color, DisplayName, SignalPayload},
};

/// Event received from a client over its channel.
///
/// `claimed_user` is the sender name the client embedded in the payload;
/// whether it is honored depends on the [`SenderPolicy`](super::SenderPolicy).
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Join {
        name: String,
        color: Option<Color>,
    },
    Chat {
        claimed_user: Option<String>,
        body: String,
        color: Option<Color>,
    },
    FileShared {
        claimed_user: Option<String>,
        file_name: String,
    },
    StartCall {
        claimed_user: Option<String>,
        signal: SignalPayload,
    },
    AcceptCall {
        claimed_user: Option<String>,
        signal: SignalPayload,
    },
}

impl InboundEvent {
    /// Wire name of the event, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "joinChat",
            Self::Chat { .. } => "chatMessage",
            Self::FileShared { .. } => "fileUpload",
            Self::StartCall { .. } => "startCall",
            Self::AcceptCall { .. } => "acceptCall",
        }
    }
}

/// Event pushed by the relay to one or more clients.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    /// Someone joined; carries the full presence map after the join.
    Joined {
        name: DisplayName,
        users: PresenceSnapshot,
    },
    /// A connection went away; `name` is `None` if it never joined.
    Left {
        name: Option<DisplayName>,
        users: PresenceSnapshot,
    },
    Chat(ChatMessage),
    FileShared(FileNotice),
    IncomingCall(SignalMessage),
    CallAccepted(SignalMessage),
    /// Sent only to the connection whose event was refused.
    Rejected(RelayError),
}

/// Why a connection's channel ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// The client sent a close frame.
    Closed,
    /// The connection dropped without a close handshake.
    TransportDrop(String),
}
