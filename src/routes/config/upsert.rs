use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{put, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

/// PUT /admin/config
/// Creates or replaces one configuration entry.
#[tracing::instrument(name = "Upsert salon config.", skip(pg_pool))]
#[put("")]
pub async fn upsert(
    form: web::Json<forms::ConfigEntry>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::SalonConfig>::build().form_error(errors.to_string()));
    }

    let form = form.into_inner();
    db::salon_config::upsert(pg_pool.get_ref(), &form.config_key, &form.config_value)
        .await
        .map(|entry| JsonResponse::build().set_item(entry).ok("OK"))
        .map_err(|err| JsonResponse::<models::SalonConfig>::build().internal_server_error(err))
}
