use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

/// GET /config
/// All salon configuration key-value pairs (business hours, contact
/// info, time slots).
#[tracing::instrument(name = "Get salon config.", skip(pg_pool))]
#[get("")]
pub async fn list(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::salon_config::fetch_all(pg_pool.get_ref())
        .await
        .map_err(|err| JsonResponse::<models::SalonConfig>::build().internal_server_error(err))
        .map(|entries| JsonResponse::build().set_list(entries).ok("OK"))
}
