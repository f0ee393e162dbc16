use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{delete, web, Responder, Result};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct CancelQuery {
    pub email: String,
}

/// What a client may see of an appointment. Ownership mismatches and
/// erased rows both read as absence, never as a status error.
fn visible_to(appointment: &models::Appointment, email: &str) -> bool {
    appointment.user_email == email && appointment.status != models::AppointmentStatus::Erased
}

/// DELETE /appointments/{id}?email=
/// Client self-cancel: a user may cancel only their own upcoming,
/// non-finished appointment. This is a soft transition to `canceled`,
/// never a row removal.
#[tracing::instrument(name = "Cancel appointment.", skip(pg_pool))]
#[delete("/{id}")]
pub async fn cancel(
    path: web::Path<(String,)>,
    query: web::Query<CancelQuery>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let appointment = db::appointment::fetch(pg_pool.get_ref(), &id)
        .await
        .map_err(|err| JsonResponse::<models::Appointment>::build().internal_server_error(err))?
        .filter(|appointment| visible_to(appointment, &query.email))
        .ok_or_else(|| JsonResponse::<models::Appointment>::build().not_found("not found"))?;

    if !appointment
        .status
        .can_transition_to(models::AppointmentStatus::Canceled)
        || appointment.status == models::AppointmentStatus::Canceled
    {
        return Err(JsonResponse::<models::Appointment>::build().bad_request(format!(
            "appointment with status '{}' cannot be canceled",
            appointment.status
        )));
    }

    if appointment.date < Utc::now().date_naive() {
        return Err(JsonResponse::<models::Appointment>::build()
            .bad_request("past appointments cannot be canceled"));
    }

    // Guarded against the status the checks above saw; a concurrent
    // change in between surfaces as zero affected rows.
    let affected = db::appointment::update_status(
        pg_pool.get_ref(),
        &id,
        appointment.status,
        models::AppointmentStatus::Canceled,
    )
    .await
    .map_err(|err| JsonResponse::<models::Appointment>::build().internal_server_error(err))?;
    if affected == 0 {
        return Err(JsonResponse::<models::Appointment>::build()
            .conflict("appointment was modified concurrently, retry"));
    }

    let canceled = models::Appointment {
        status: models::AppointmentStatus::Canceled,
        ..appointment
    };
    Ok(JsonResponse::build()
        .set_id(id)
        .set_item(canceled)
        .ok("Appointment canceled"))
}

/// DELETE /admin/appointments/{id}
/// Administrative purge: permanently removes the row. The product-facing
/// deletion path is the `erased` status, which preserves history.
#[tracing::instrument(name = "Purge appointment.", skip(pg_pool))]
#[delete("/{id}")]
pub async fn purge(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (id,) = path.into_inner();

    let affected = db::appointment::delete(pg_pool.get_ref(), &id)
        .await
        .map_err(|err| JsonResponse::<models::Appointment>::build().internal_server_error(err))?;

    if affected == 0 {
        return Err(JsonResponse::<models::Appointment>::build().not_found("not found"));
    }

    Ok(JsonResponse::<models::Appointment>::build()
        .set_id(id)
        .ok("Appointment purged"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn appointment(email: &str, status: models::AppointmentStatus) -> models::Appointment {
        models::Appointment {
            id: "a1".to_string(),
            user_email: email.to_string(),
            service_name: "corte".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            time: "10:00".to_string(),
            status,
            price: 50.0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn own_active_appointment_is_visible() {
        let own = appointment("ana@example.com", models::AppointmentStatus::Pending);
        assert!(visible_to(&own, "ana@example.com"));
    }

    #[test]
    fn someone_elses_appointment_reads_as_absent() {
        let other = appointment("bia@example.com", models::AppointmentStatus::Pending);
        assert!(!visible_to(&other, "ana@example.com"));
    }

    #[test]
    fn erased_appointment_reads_as_absent_even_to_its_owner() {
        let erased = appointment("ana@example.com", models::AppointmentStatus::Erased);
        assert!(!visible_to(&erased, "ana@example.com"));
    }
}
