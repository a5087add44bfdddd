//! WebSocket wire DTOs.
//!
//! Every frame is a JSON text frame of the form
//! `{"event": "<name>", "data": { ... }}` with camelCase field names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Events sent by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    JoinChat(JoinChatData),
    ChatMessage(OutgoingChatData),
    FileUpload(OutgoingFileData),
    StartCall(OutgoingSignalData),
    AcceptCall(OutgoingSignalData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinChatData {
    /// Missing names deserialize as empty and are refused as an invalid join.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingChatData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingFileData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingSignalData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub signal: serde_json::Value,
}

/// Events sent by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    JoinChat(PresenceChangedData),
    LeaveChat(PresenceLeftData),
    ChatMessage(ChatMessageData),
    FileUpload(FileUploadData),
    IncomingCall(SignalData),
    CallAccepted(SignalData),
    Error(ErrorData),
}

/// Presence map on the wire: connection id → display name
pub type UsersDto = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceChangedData {
    pub name: String,
    pub users: UsersDto,
}

/// `name` is `null` when a connection that never joined goes away
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenceLeftData {
    pub name: Option<String>,
    pub users: UsersDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageData {
    pub user: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadData {
    pub user: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalData {
    pub user: String,
    pub signal: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorData {
    pub kind: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_join_chat() {
        // テスト項目: joinChat イベントをパースできる
        // given (前提条件):
        let text = r##"{"event":"joinChat","data":{"name":"Alice","color":"#ff8800"}}"##;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::JoinChat(JoinChatData {
                name: "Alice".to_string(),
                color: Some("#ff8800".to_string()),
            })
        );
    }

    #[test]
    fn test_parse_join_chat_without_name_defaults_to_empty() {
        // テスト項目: name のない joinChat は空の名前としてパースされる
        // given (前提条件):
        let text = r#"{"event":"joinChat","data":{}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert!(matches!(event, ClientEvent::JoinChat(data) if data.name.is_empty()));
    }

    #[test]
    fn test_parse_start_call_keeps_signal_opaque() {
        // テスト項目: startCall のシグナルは任意の JSON のまま保持される
        // given (前提条件):
        let text = r#"{"event":"startCall","data":{"signal":{"type":"offer","sdp":"v=0\r\n"},"user":"Alice"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::StartCall(OutgoingSignalData {
                user: Some("Alice".to_string()),
                signal: json!({"type": "offer", "sdp": "v=0\r\n"}),
            })
        );
    }

    #[test]
    fn test_parse_unknown_event_fails() {
        // テスト項目: 未知のイベント名はパースエラーになる
        // given (前提条件):
        let text = r#"{"event":"hangUp","data":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_leave_chat_serializes_null_name() {
        // テスト項目: 未 join の切断では name が null としてシリアライズされる
        // given (前提条件):
        let event = ServerEvent::LeaveChat(PresenceLeftData {
            name: None,
            users: UsersDto::new(),
        });

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"event": "leaveChat", "data": {"name": null, "users": {}}})
        );
    }

    #[test]
    fn test_file_upload_uses_camel_case() {
        // テスト項目: fileUpload のフィールド名が camelCase になる
        // given (前提条件):
        let event = ServerEvent::FileUpload(FileUploadData {
            user: "Bob".to_string(),
            file_name: "1700000000000.png".to_string(),
        });

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"event": "fileUpload", "data": {"user": "Bob", "fileName": "1700000000000.png"}})
        );
    }
}
