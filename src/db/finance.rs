use crate::models::AppointmentStatus;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::Instrument;

/// Sum and count of finished appointments inside a date range.
#[derive(Debug, Clone, Copy, PartialEq, sqlx::FromRow)]
pub struct IncomeSlice {
    pub total: f64,
    pub count: i64,
}

/// Income over `[from, to)`. Status is re-evaluated at query time: an
/// appointment contributes only while its current status is `finished`.
pub async fn income_between(
    pool: &PgPool,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<IncomeSlice, String> {
    let query_span = tracing::info_span!("Aggregating finished appointment income");
    sqlx::query_as::<_, IncomeSlice>(
        r#"
        SELECT COALESCE(SUM(price), 0)::float8 AS total,
               COUNT(*) AS count
        FROM appointments
        WHERE status = $1 AND date >= $2 AND date < $3
        "#,
    )
    .bind(AppointmentStatus::Finished)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!(
            "Failed to aggregate income for [{}, {}): {:?}",
            from,
            to,
            err
        );
        "Failed to compute income".to_string()
    })
}
