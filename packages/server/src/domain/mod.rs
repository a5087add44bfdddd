//! Domain layer: value objects, the presence aggregate, relay events and the
//! interfaces the outer layers implement.

pub mod entity;
pub mod error;
pub mod event;
pub mod file_storage;
pub mod message_pusher;
pub mod repository;
pub mod sender_policy;
pub mod value_object;

pub use entity::{
    ChatMessage, Departure, FileNotice, Participant, Presence, PresenceSnapshot, SignalMessage,
};
pub use error::{MessagePushError, RelayError, StorageError, ValueObjectError};
pub use event::{DisconnectReason, InboundEvent, RelayEvent};
pub use file_storage::FileStorage;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::PresenceRepository;
pub use sender_policy::SenderPolicy;
pub use value_object::{Color, ConnectionId, DisplayName, SignalPayload, StoredFileName, Timestamp};
