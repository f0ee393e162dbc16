use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::PgPool;

/// POST /appointments
/// Books an appointment. The price is captured here and never re-derived
/// from the service catalog afterwards.
#[tracing::instrument(name = "Create appointment.", skip(pg_pool))]
#[post("")]
pub async fn add(
    form: web::Json<forms::Appointment>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    if let Err(errors) = form.validate() {
        return Err(JsonResponse::<models::Appointment>::build().form_error(errors.to_string()));
    }

    let appointment: models::Appointment = form.into_inner().into();

    db::appointment::insert(pg_pool.get_ref(), appointment)
        .await
        .map(|appointment| {
            let id = appointment.id.clone();
            JsonResponse::build()
                .set_id(id)
                .set_item(appointment)
                .created("Appointment booked")
        })
        .map_err(|err| JsonResponse::<models::Appointment>::build().internal_server_error(err))
}
