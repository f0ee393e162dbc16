use crate::helpers::JsonResponse;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

#[tracing::instrument(name = "Health check.", skip(pg_pool))]
#[get("")]
pub async fn health_check(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    sqlx::query("SELECT 1")
        .execute(pg_pool.get_ref())
        .await
        .map_err(|err| JsonResponse::<()>::build().internal_server_error(err.to_string()))
        .map(|_| JsonResponse::<()>::build().ok("alive"))
}
