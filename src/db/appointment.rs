use crate::models;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn insert(
    pool: &PgPool,
    appointment: models::Appointment,
) -> Result<models::Appointment, String> {
    let query_span = tracing::info_span!("Inserting appointment into database");
    sqlx::query_as::<_, models::Appointment>(
        r#"
        INSERT INTO appointments (id, user_email, service_name, date, time, status, price, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_email, service_name, date, time, status, price, created_at
        "#,
    )
    .bind(appointment.id)
    .bind(appointment.user_email)
    .bind(appointment.service_name)
    .bind(appointment.date)
    .bind(appointment.time)
    .bind(appointment.status)
    .bind(appointment.price)
    .bind(appointment.created_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to insert appointment: {:?}", err);
        "Failed to create appointment".to_string()
    })
}

pub async fn fetch(pool: &PgPool, id: &str) -> Result<Option<models::Appointment>, String> {
    let query_span = tracing::info_span!("Fetching appointment by id");
    sqlx::query_as::<_, models::Appointment>(
        r#"
        SELECT id, user_email, service_name, date, time, status, price, created_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch appointment {}: {:?}", id, err);
        "Database error".to_string()
    })
}

/// Admin view: every appointment, newest booking first.
pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::Appointment>, String> {
    let query_span = tracing::info_span!("Fetching all appointments");
    sqlx::query_as::<_, models::Appointment>(
        r#"
        SELECT id, user_email, service_name, date, time, status, price, created_at
        FROM appointments
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch appointments: {:?}", err);
        "Failed to fetch appointments".to_string()
    })
}

pub async fn fetch_by_email(
    pool: &PgPool,
    user_email: &str,
) -> Result<Vec<models::Appointment>, String> {
    let query_span = tracing::info_span!("Fetching appointments by user");
    sqlx::query_as::<_, models::Appointment>(
        r#"
        SELECT id, user_email, service_name, date, time, status, price, created_at
        FROM appointments
        WHERE user_email = $1
        ORDER BY date DESC, time ASC
        "#,
    )
    .bind(user_email)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch appointments for {}: {:?}", user_email, err);
        "Failed to fetch appointments".to_string()
    })
}

/// Time slots already taken on a given day. Canceled and erased
/// appointments free their slot.
pub async fn occupied_slots(pool: &PgPool, date: NaiveDate) -> Result<Vec<String>, String> {
    let query_span = tracing::info_span!("Fetching occupied slots");
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT time FROM appointments
        WHERE date = $1 AND status NOT IN ('canceled', 'erased')
        ORDER BY time ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch occupied slots for {}: {:?}", date, err);
        "Failed to fetch occupied slots".to_string()
    })
}

/// Compare-and-set: the write carries the status the caller validated
/// against, so a concurrent change (or a purge) between read and write
/// shows up as zero affected rows instead of clobbering it.
pub async fn update_status(
    pool: &PgPool,
    id: &str,
    expected: models::AppointmentStatus,
    status: models::AppointmentStatus,
) -> Result<u64, String> {
    let query_span = tracing::info_span!("Updating appointment status");
    sqlx::query(r#"UPDATE appointments SET status = $2 WHERE id = $1 AND status = $3"#)
        .bind(id)
        .bind(status)
        .bind(expected)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected())
        .map_err(|err| {
            tracing::error!("Failed to update status of {}: {:?}", id, err);
            "Failed to update appointment status".to_string()
        })
}

/// Administrative purge. Product-facing deletion is the `erased` status;
/// this permanently removes the row.
pub async fn delete(pool: &PgPool, id: &str) -> Result<u64, String> {
    let query_span = tracing::info_span!("Deleting appointment");
    sqlx::query(r#"DELETE FROM appointments WHERE id = $1"#)
        .bind(id)
        .execute(pool)
        .instrument(query_span)
        .await
        .map(|result| result.rows_affected())
        .map_err(|err| {
            tracing::error!("Failed to delete appointment {}: {:?}", id, err);
            "Failed to delete appointment".to_string()
        })
}
