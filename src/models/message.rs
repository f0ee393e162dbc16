use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a chat message. Stored as text, matching the database
/// CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
    User,
    Admin,
}

impl SenderRole {
    /// The other side of a conversation thread.
    pub fn counterparty(self) -> SenderRole {
        match self {
            SenderRole::User => SenderRole::Admin,
            SenderRole::Admin => SenderRole::User,
        }
    }
}

impl std::fmt::Display for SenderRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SenderRole::User => write!(f, "user"),
            SenderRole::Admin => write!(f, "admin"),
        }
    }
}

/// One persisted chat message. Immutable once created except for the
/// `is_read` flip performed by the read-receipt tracker.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i32,
    pub user_email: String,
    pub sender: SenderRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}
