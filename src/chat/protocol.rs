use super::rooms::RoomKey;
use crate::models::{Message, SenderRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events a connected client may send. Frames are JSON envelopes of the
/// form `{"event": "...", "data": ...}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Raw room key: a user email or the admin room literal.
    JoinRoom(String),
    SendMessage(SendMessagePayload),
    MarkRead(MarkReadPayload),
}

#[derive(Debug, Deserialize)]
pub struct SendMessagePayload {
    pub email: String,
    pub content: String,
    /// Defaults to `user` when absent, matching the client apps.
    #[serde(default)]
    pub sender: Option<SenderRole>,
}

#[derive(Debug, Deserialize)]
pub struct MarkReadPayload {
    #[serde(rename = "userEmail")]
    pub user_email: String,
    pub actor: SenderRole,
}

/// Events the server pushes to a room, or to a single session for
/// `error`.
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    NewMessage(NewMessagePayload),
    MessageReadReceipt(ReadReceiptPayload),
    Error(ErrorPayload),
}

#[derive(Debug, Serialize)]
pub struct NewMessagePayload {
    pub id: i32,
    pub user_email: String,
    pub sender: SenderRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for NewMessagePayload {
    fn from(message: &Message) -> Self {
        NewMessagePayload {
            id: message.id,
            user_email: message.user_email.clone(),
            sender: message.sender,
            content: message.content.clone(),
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadReceiptPayload {
    #[serde(rename = "readerEmail")]
    pub reader_email: String,
    #[serde(rename = "readByUserEmail")]
    pub read_by_user_email: String,
    pub actor: SenderRole,
    pub timestamp: DateTime<Utc>,
}

impl ReadReceiptPayload {
    /// Receipt for `actor` having read the counterparty's messages in
    /// the thread of `user_email`.
    pub fn new(user_email: &str, actor: SenderRole) -> Self {
        let (reader_email, read_by_user_email) = match actor {
            SenderRole::User => (user_email.to_string(), "admin".to_string()),
            SenderRole::Admin => ("admin".to_string(), user_email.to_string()),
        };
        ReadReceiptPayload {
            reader_email,
            read_by_user_email,
            actor,
            timestamp: Utc::now(),
        }
    }
}

/// Destination and payload for a mark-read receipt: the admin room when
/// a user read, the user's own room when the admin did. The receipt goes
/// out regardless of `affected` - a second mark-read that flips no rows
/// still produces one, and clients tolerate the redundancy.
pub fn read_receipt(user_email: &str, actor: SenderRole, affected: u64) -> (RoomKey, ReadReceiptPayload) {
    tracing::debug!(
        "Marked {} messages read for {} by {}",
        affected,
        user_email,
        actor
    );
    let room = match actor {
        SenderRole::User => RoomKey::Admin,
        SenderRole::Admin => RoomKey::user(user_email),
    };
    (room, ReadReceiptPayload::new(user_email, actor))
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub message: String,
    pub error: String,
}

impl ServerEvent {
    pub fn error(message: impl Into<String>, error: impl Into<String>) -> Self {
        ServerEvent::Error(ErrorPayload {
            message: message.into(),
            error: error.into(),
        })
    }

    /// Serialized wire frame. Our own types always serialize.
    pub fn to_frame(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            tracing::error!("Failed to serialize server event: {:?}", err);
            r#"{"event":"error","data":{"message":"serialization failure","error":""}}"#.to_string()
        })
    }
}
