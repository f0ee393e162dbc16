use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use sqlx::PgPool;

/// GET /chat/admin/list
/// Conversation summaries for the admin inbox, newest activity first.
/// Registered before the `{email}` route so the literal path wins.
#[tracing::instrument(name = "Get admin conversation list.", skip(pg_pool))]
#[get("/admin/list")]
pub async fn admin_list(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::chat::admin_list(pg_pool.get_ref())
        .await
        .map_err(|err| JsonResponse::<models::ChatSummary>::build().internal_server_error(err))
        .map(|summaries| JsonResponse::build().set_list(summaries).ok("OK"))
}

/// GET /chat/{email}
/// Full ordered message history for one user's thread.
#[tracing::instrument(name = "Get chat thread.", skip(pg_pool))]
#[get("/{email}")]
pub async fn thread(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (email,) = path.into_inner();

    db::chat::fetch_thread(pg_pool.get_ref(), &email)
        .await
        .map_err(|err| JsonResponse::<models::Message>::build().internal_server_error(err))
        .map(|messages| JsonResponse::build().set_list(messages).ok("OK"))
}
