use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<models::SalonConfig>, String> {
    let query_span = tracing::info_span!("Fetching salon configuration");
    sqlx::query_as::<_, models::SalonConfig>(
        r#"
        SELECT id, config_key, config_value, updated_at
        FROM salon_config
        ORDER BY config_key ASC
        "#,
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch salon config: {:?}", err);
        "Failed to fetch configuration".to_string()
    })
}

pub async fn upsert(
    pool: &PgPool,
    config_key: &str,
    config_value: &str,
) -> Result<models::SalonConfig, String> {
    let query_span = tracing::info_span!("Upserting salon configuration");
    sqlx::query_as::<_, models::SalonConfig>(
        r#"
        INSERT INTO salon_config (config_key, config_value)
        VALUES ($1, $2)
        ON CONFLICT (config_key)
        DO UPDATE SET config_value = EXCLUDED.config_value, updated_at = NOW()
        RETURNING id, config_key, config_value, updated_at
        "#,
    )
    .bind(config_key)
    .bind(config_value)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to upsert config key {}: {:?}", config_key, err);
        "Failed to store configuration".to_string()
    })
}
