//! Conversion logic between DTOs and domain types.

use irori_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    Color, InboundEvent, Participant, PresenceSnapshot, RelayEvent, SignalMessage, SignalPayload,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientEvent> for InboundEvent {
    fn from(event: dto::ClientEvent) -> Self {
        match event {
            dto::ClientEvent::JoinChat(data) => Self::Join {
                name: data.name,
                color: data.color.map(Color::from),
            },
            dto::ClientEvent::ChatMessage(data) => Self::Chat {
                claimed_user: data.user,
                body: data.message,
                color: data.color.map(Color::from),
            },
            dto::ClientEvent::FileUpload(data) => Self::FileShared {
                claimed_user: data.user,
                file_name: data.file_name,
            },
            dto::ClientEvent::StartCall(data) => Self::StartCall {
                claimed_user: data.user,
                signal: SignalPayload::new(data.signal),
            },
            dto::ClientEvent::AcceptCall(data) => Self::AcceptCall {
                claimed_user: data.user,
                signal: SignalPayload::new(data.signal),
            },
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

fn users_to_dto(users: PresenceSnapshot) -> dto::UsersDto {
    users
        .into_iter()
        .map(|(id, name)| (id.into_string(), name.into_string()))
        .collect()
}

fn signal_to_dto(message: SignalMessage) -> dto::SignalData {
    dto::SignalData {
        user: message.sender,
        signal: message.signal.into_value(),
    }
}

impl From<RelayEvent> for dto::ServerEvent {
    fn from(event: RelayEvent) -> Self {
        match event {
            RelayEvent::Joined { name, users } => Self::JoinChat(dto::PresenceChangedData {
                name: name.into_string(),
                users: users_to_dto(users),
            }),
            RelayEvent::Left { name, users } => Self::LeaveChat(dto::PresenceLeftData {
                name: name.map(|name| name.into_string()),
                users: users_to_dto(users),
            }),
            RelayEvent::Chat(message) => Self::ChatMessage(dto::ChatMessageData {
                user: message.sender,
                message: message.body,
                color: message.color.map(Color::into_string),
            }),
            RelayEvent::FileShared(notice) => Self::FileUpload(dto::FileUploadData {
                user: notice.sender,
                file_name: notice.file_name,
            }),
            RelayEvent::IncomingCall(message) => Self::IncomingCall(signal_to_dto(message)),
            RelayEvent::CallAccepted(message) => Self::CallAccepted(signal_to_dto(message)),
            RelayEvent::Rejected(error) => Self::Error(dto::ErrorData {
                kind: error.kind().to_string(),
                message: error.to_string(),
            }),
        }
    }
}

impl From<Participant> for http::ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            connection_id: participant.connection_id.into_string(),
            name: participant.name.into_string(),
            joined_at: timestamp_to_rfc3339(participant.joined_at.value()),
        }
    }
}
