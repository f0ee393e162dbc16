use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-user conversation summary shown in the admin chat list.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub email: String,
    pub name: String,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub unread_count: i64,
    /// Derived from `unread_count` after the fetch; not a table column.
    #[sqlx(default)]
    pub unread: bool,
}
