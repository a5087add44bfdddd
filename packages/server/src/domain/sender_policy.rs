//! How the relay decides who sent a chat, file notice or signaling event.

use std::{fmt, str::FromStr};

use super::{
    error::{RelayError, ValueObjectError},
    value_object::{ConnectionId, DisplayName},
};

/// Sender identity policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SenderPolicy {
    /// The name bound at join time is authoritative. Events from connections
    /// that have not joined are refused with [`RelayError::UnknownSender`] and
    /// any sender name embedded in the payload is ignored.
    #[default]
    Bound,
    /// Relay whatever sender name the client claims, joined or not. Falls back
    /// to the joined name, then to an empty name.
    Trusting,
}

impl SenderPolicy {
    /// Resolve the sender name to relay.
    ///
    /// # Arguments
    ///
    /// * `connection_id` - The connection the event arrived on
    /// * `joined_name` - The connection's name in the presence map, if any
    /// * `claimed` - The sender name embedded in the payload, if any
    pub fn resolve(
        self,
        connection_id: &ConnectionId,
        joined_name: Option<DisplayName>,
        claimed: Option<String>,
    ) -> Result<String, RelayError> {
        match self {
            Self::Bound => joined_name
                .map(DisplayName::into_string)
                .ok_or_else(|| RelayError::UnknownSender(connection_id.clone())),
            Self::Trusting => Ok(claimed
                .or_else(|| joined_name.map(DisplayName::into_string))
                .unwrap_or_default()),
        }
    }
}

impl FromStr for SenderPolicy {
    type Err = ValueObjectError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "bound" => Ok(Self::Bound),
            "trusting" => Ok(Self::Trusting),
            _ => Err(ValueObjectError::UnknownSenderPolicy(value.to_string())),
        }
    }
}

impl fmt::Display for SenderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound => f.write_str("bound"),
            Self::Trusting => f.write_str("trusting"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> ConnectionId {
        ConnectionId::new("c1".to_string()).unwrap()
    }

    fn alice() -> Option<DisplayName> {
        Some(DisplayName::new("Alice".to_string()).unwrap())
    }

    #[test]
    fn test_bound_uses_joined_name_and_ignores_claim() {
        // テスト項目: Bound ではクライアントが名乗った名前ではなく join 時の名前が使われる
        // when (操作):
        let result = SenderPolicy::Bound.resolve(&conn(), alice(), Some("Mallory".to_string()));

        // then (期待する結果):
        assert_eq!(result, Ok("Alice".to_string()));
    }

    #[test]
    fn test_bound_rejects_unjoined_connection() {
        // テスト項目: Bound では未 join の接続からのイベントが UnknownSender になる
        // when (操作):
        let result = SenderPolicy::Bound.resolve(&conn(), None, Some("Mallory".to_string()));

        // then (期待する結果):
        assert_eq!(result, Err(RelayError::UnknownSender(conn())));
    }

    #[test]
    fn test_trusting_relays_claimed_name() {
        // テスト項目: Trusting ではクライアントが名乗った名前がそのまま使われる
        // when (操作):
        let joined = SenderPolicy::Trusting.resolve(&conn(), alice(), Some("Mallory".to_string()));
        let unjoined = SenderPolicy::Trusting.resolve(&conn(), None, Some("Mallory".to_string()));

        // then (期待する結果):
        assert_eq!(joined, Ok("Mallory".to_string()));
        assert_eq!(unjoined, Ok("Mallory".to_string()));
    }

    #[test]
    fn test_trusting_falls_back_to_joined_then_empty() {
        // テスト項目: Trusting で名前の申告がない場合は join 名、それもなければ空文字列
        // when (操作):
        let joined = SenderPolicy::Trusting.resolve(&conn(), alice(), None);
        let anonymous = SenderPolicy::Trusting.resolve(&conn(), None, None);

        // then (期待する結果):
        assert_eq!(joined, Ok("Alice".to_string()));
        assert_eq!(anonymous, Ok(String::new()));
    }

    #[test]
    fn test_parse_policy_names() {
        // テスト項目: ポリシー名を大文字小文字を区別せずにパースできる
        // when (操作) / then (期待する結果):
        assert_eq!("bound".parse::<SenderPolicy>(), Ok(SenderPolicy::Bound));
        assert_eq!("Trusting".parse::<SenderPolicy>(), Ok(SenderPolicy::Trusting));
        assert_eq!(
            "open".parse::<SenderPolicy>(),
            Err(ValueObjectError::UnknownSenderPolicy("open".to_string()))
        );
        assert_eq!(SenderPolicy::Trusting.to_string(), "trusting");
    }
}
