//! Wire format for chat events.
//!
//! Messages are JSON objects tagged by an `event` field, mirroring the
//! event names the browser client emits.

use serde::{Deserialize, Serialize};

/// Events a client may send over the chat socket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Attach a display name to the connection; overwrite allowed at any
    /// time, before or after joining a room.
    SetUsername { username: String },

    /// Join a broadcast room.
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, user_id: String },

    /// Broadcast a message to everyone currently in the room.
    #[serde(rename_all = "camelCase")]
    SendMessage {
        room_id: String,
        message: String,
        sender_id: String,
    },
}

/// Events the server broadcasts to room members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    ReceivedMessage {
        sender_id: String,
        message: String,
        sender_username: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_wire_names() {
        let event: ClientEvent =
            serde_json::from_str(r#"{"event":"set-username","username":"alice"}"#).unwrap();
        assert_eq!(
            event,
            ClientEvent::SetUsername {
                username: "alice".to_string()
            }
        );

        let event: ClientEvent =
            serde_json::from_str(r#"{"event":"join-room","roomId":"r1","userId":"u1"}"#).unwrap();
        assert_eq!(
            event,
            ClientEvent::JoinRoom {
                room_id: "r1".to_string(),
                user_id: "u1".to_string()
            }
        );

        let event: ClientEvent = serde_json::from_str(
            r#"{"event":"send-message","roomId":"r1","message":"hi","senderId":"u1"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            ClientEvent::SendMessage {
                room_id: "r1".to_string(),
                message: "hi".to_string(),
                sender_id: "u1".to_string()
            }
        );
    }

    #[test]
    fn test_server_event_wire_shape() {
        let event = ServerEvent::ReceivedMessage {
            sender_id: "u1".to_string(),
            message: "hi".to_string(),
            sender_username: "alice".to_string(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "received-message");
        assert_eq!(json["senderId"], "u1");
        assert_eq!(json["message"], "hi");
        assert_eq!(json["senderUsername"], "alice");
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"event":"shutdown-server"}"#);
        assert!(result.is_err());
    }
}
