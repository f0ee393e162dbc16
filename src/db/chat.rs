use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn insert_message(
    pool: &PgPool,
    user_email: &str,
    sender: models::SenderRole,
    content: &str,
) -> Result<models::Message, String> {
    let query_span = tracing::info_span!("Inserting chat message into database");
    sqlx::query_as::<_, models::Message>(
        r#"
        INSERT INTO messages (user_email, sender, content, is_read)
        VALUES ($1, $2, $3, FALSE)
        RETURNING id, user_email, sender, content, created_at, is_read
        "#,
    )
    .bind(user_email)
    .bind(sender)
    .bind(content)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to insert message: {:?}", err);
        "Failed to store message".to_string()
    })
}

pub async fn fetch_thread(
    pool: &PgPool,
    user_email: &str,
) -> Result<Vec<models::Message>, String> {
    let query_span = tracing::info_span!("Fetching chat thread");
    sqlx::query_as::<_, models::Message>(
        r#"
        SELECT id, user_email, sender, content, created_at, is_read
        FROM messages
        WHERE user_email = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_email)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch thread for {}: {:?}", user_email, err);
        "Failed to fetch messages".to_string()
    })
}

/// Bulk-marks the counterparty's messages in this thread as read and
/// returns how many rows actually flipped. Zero affected rows is a valid
/// outcome; the caller still emits a receipt.
pub async fn mark_read(
    pool: &PgPool,
    user_email: &str,
    actor: models::SenderRole,
) -> Result<u64, String> {
    let query_span = tracing::info_span!("Marking messages as read");
    sqlx::query(
        r#"
        UPDATE messages
        SET is_read = TRUE
        WHERE user_email = $1 AND sender = $2 AND is_read = FALSE
        "#,
    )
    .bind(user_email)
    .bind(actor.counterparty())
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|result| result.rows_affected())
    .map_err(|err| {
        tracing::error!("Failed to mark messages read for {}: {:?}", user_email, err);
        "Failed to mark messages as read".to_string()
    })
}

/// Conversation summaries for the admin list, newest activity first.
/// `unread` counts only user-sent messages the admin has not read yet.
pub async fn admin_list(pool: &PgPool) -> Result<Vec<models::ChatSummary>, String> {
    let query_span = tracing::info_span!("Fetching admin conversation list");
    sqlx::query_as::<_, models::ChatSummary>(
        r#"
        SELECT m.user_email AS email,
               COALESCE(u.name, m.user_email) AS name,
               (SELECT content FROM messages
                WHERE user_email = m.user_email
                ORDER BY created_at DESC, id DESC LIMIT 1) AS last_message,
               MAX(m.created_at) AS last_message_time,
               COUNT(*) FILTER (WHERE m.sender = 'user' AND NOT m.is_read) AS unread_count
        FROM messages m
        LEFT JOIN users u ON u.email = m.user_email
        GROUP BY m.user_email, u.name
        ORDER BY last_message_time DESC
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map(|summaries| {
        summaries
            .into_iter()
            .map(|mut summary| {
                summary.unread = summary.unread_count > 0;
                summary
            })
            .collect()
    })
    .map_err(|err| {
        tracing::error!("Failed to fetch conversation list: {:?}", err);
        "Failed to fetch conversations".to_string()
    })
}
