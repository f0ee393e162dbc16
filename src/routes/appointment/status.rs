use crate::db;
use crate::forms;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{patch, web, Responder, Result};
use sqlx::PgPool;

/// PATCH /appointments/{id}/status
/// Admin-driven status change, validated against the transition graph.
/// Re-applying the current status is an idempotent no-op.
#[tracing::instrument(name = "Update appointment status.", skip(pg_pool))]
#[patch("/{id}/status")]
pub async fn set_status(
    path: web::Path<(String,)>,
    form: web::Json<forms::StatusChange>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();
    let next = form.into_inner().status;

    let appointment = db::appointment::fetch(pg_pool.get_ref(), &id)
        .await
        .map_err(|err| JsonResponse::<models::Appointment>::build().internal_server_error(err))?
        .ok_or_else(|| JsonResponse::<models::Appointment>::build().not_found("not found"))?;

    if appointment.status == next {
        return Ok(JsonResponse::build()
            .set_id(id)
            .set_item(appointment)
            .ok("Status unchanged"));
    }

    if !appointment.status.can_transition_to(next) {
        return Err(JsonResponse::<models::Appointment>::build().bad_request(format!(
            "cannot move appointment from '{}' to '{}'",
            appointment.status, next
        )));
    }

    // Guarded against the status the checks above saw; a concurrent
    // change (or a purge) in between surfaces as zero affected rows.
    let affected = db::appointment::update_status(pg_pool.get_ref(), &id, appointment.status, next)
        .await
        .map_err(|err| JsonResponse::<models::Appointment>::build().internal_server_error(err))?;
    if affected == 0 {
        return Err(JsonResponse::<models::Appointment>::build()
            .conflict("appointment was modified concurrently, retry"));
    }

    let updated = models::Appointment {
        status: next,
        ..appointment
    };
    Ok(JsonResponse::build()
        .set_id(id)
        .set_item(updated)
        .ok(format!("Status updated to '{}'", next)))
}
