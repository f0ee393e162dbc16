use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

/// POST /chat
/// Persistence fallback used when the socket connection is unavailable.
/// No broadcast happens here; connected peers pick the message up on
/// their next history fetch.
#[tracing::instrument(name = "Send chat message over REST.", skip(pg_pool))]
#[post("")]
pub async fn add(
    form: web::Json<forms::SendMessage>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Message>::build().form_error(errors.to_string()));
    }

    let form = form.into_inner();
    let sender = form.sender.unwrap_or(models::SenderRole::User);

    db::chat::insert_message(pg_pool.get_ref(), &form.email, sender, &form.content)
        .await
        .map(|message| {
            JsonResponse::build()
                .set_item(message)
                .created("Message stored")
        })
        .map_err(|err| JsonResponse::<models::Message>::build().internal_server_error(err))
}
