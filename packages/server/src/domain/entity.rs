//! Entities and the presence aggregate.

use std::collections::BTreeMap;

use super::value_object::{Color, ConnectionId, DisplayName, SignalPayload, Timestamp};

/// Snapshot of the presence map broadcast on every presence change.
///
/// Ordered by connection id so every broadcast lists users in the same order.
pub type PresenceSnapshot = BTreeMap<ConnectionId, DisplayName>;

/// A connection that has completed a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub name: DisplayName,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            name,
            joined_at,
        }
    }
}

/// Outcome of removing a connection from the presence map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Name the connection had joined with, `None` if it never joined.
    pub name: Option<DisplayName>,
    /// Presence map after the removal.
    pub remaining: PresenceSnapshot,
}

/// The presence map: connection id → participant.
///
/// Invariant: a connection is present iff it has joined and not yet
/// disconnected. Joining again under the same connection replaces the name.
#[derive(Debug, Clone, Default)]
pub struct Presence {
    participants: BTreeMap<ConnectionId, Participant>,
}

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the participant, returning the previous entry.
    pub fn join(&mut self, participant: Participant) -> Option<Participant> {
        self.participants
            .insert(participant.connection_id.clone(), participant)
    }

    /// Remove the connection. Removing an unknown connection is a no-op.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> Departure {
        let name = self
            .participants
            .remove(connection_id)
            .map(|participant| participant.name);
        Departure {
            name,
            remaining: self.snapshot(),
        }
    }

    pub fn name_of(&self, connection_id: &ConnectionId) -> Option<&DisplayName> {
        self.participants
            .get(connection_id)
            .map(|participant| &participant.name)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.participants.contains_key(connection_id)
    }

    pub fn snapshot(&self) -> PresenceSnapshot {
        self.participants
            .iter()
            .map(|(id, participant)| (id.clone(), participant.name.clone()))
            .collect()
    }

    /// Participants ordered by connection id.
    pub fn participants(&self) -> Vec<Participant> {
        self.participants.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Chat message as relayed. Body and color are never transformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub body: String,
    pub color: Option<Color>,
}

/// "File uploaded" notice carrying the generated storage name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNotice {
    pub sender: String,
    pub file_name: String,
}

/// Offer or answer relayed between call peers.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalMessage {
    pub sender: String,
    pub signal: SignalPayload,
}
