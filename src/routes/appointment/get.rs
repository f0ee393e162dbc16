use crate::db;
use crate::helpers::JsonResponse;
use crate::models;
use actix_web::{get, web, Responder, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

/// GET /appointments
/// Admin view: every appointment, newest booking first.
#[tracing::instrument(name = "Get all appointments.", skip(pg_pool))]
#[get("")]
pub async fn list(pg_pool: web::Data<PgPool>) -> Result<impl Responder> {
    db::appointment::fetch_all(pg_pool.get_ref())
        .await
        .map_err(|err| JsonResponse::<models::Appointment>::build().internal_server_error(err))
        .map(|appointments| JsonResponse::build().set_list(appointments).ok("OK"))
}

/// GET /appointments/by-date/{date}
/// Occupied time slots for a day; canceled and erased bookings free
/// their slot. Registered before `{email}` so the literal prefix wins.
#[tracing::instrument(name = "Get occupied slots.", skip(pg_pool))]
#[get("/by-date/{date}")]
pub async fn by_date(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (raw_date,) = path.into_inner();
    let date = raw_date.parse::<NaiveDate>().map_err(|_| {
        JsonResponse::<String>::build().bad_request("date must be YYYY-MM-DD")
    })?;

    db::appointment::occupied_slots(pg_pool.get_ref(), date)
        .await
        .map_err(|err| JsonResponse::<String>::build().internal_server_error(err))
        .map(|slots| JsonResponse::build().set_list(slots).ok("OK"))
}

/// GET /appointments/{email}
/// One user's appointments, most recent date first.
#[tracing::instrument(name = "Get user appointments.", skip(pg_pool))]
#[get("/{email}")]
pub async fn by_email(
    path: web::Path<(String,)>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (email,) = path.into_inner();

    db::appointment::fetch_by_email(pg_pool.get_ref(), &email)
        .await
        .map_err(|err| JsonResponse::<models::Appointment>::build().internal_server_error(err))
        .map(|appointments| JsonResponse::build().set_list(appointments).ok("OK"))
}
