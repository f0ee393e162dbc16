use crate::db;
use crate::helpers::JsonResponse;
use actix_web::{get, web, Responder, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct Query {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceReport {
    pub real: f64,
    pub projection: i64,
    pub count: i64,
    pub total_year: f64,
}

/// GET /finance?month=&year=
/// Monthly income from finished appointments, a naive linear projection
/// for the rest of the current month, and the year-to-date total.
/// Status is re-evaluated at query time, so retroactive status edits
/// move historical totals.
#[tracing::instrument(name = "Get finance report.", skip(pg_pool))]
#[get("")]
pub async fn report(
    query: web::Query<Query>,
    pg_pool: web::Data<PgPool>,
) -> Result<impl Responder> {
    let (Some(month), Some(year)) = (query.month, query.year) else {
        return Err(JsonResponse::<FinanceReport>::build()
            .bad_request("month and year are required"));
    };

    let (month_start, month_end) = month_bounds(year, month).ok_or_else(|| {
        JsonResponse::<FinanceReport>::build().bad_request("invalid month or year")
    })?;
    let (year_start, year_end) = year_bounds(year).ok_or_else(|| {
        JsonResponse::<FinanceReport>::build().bad_request("invalid month or year")
    })?;

    let monthly = db::finance::income_between(pg_pool.get_ref(), month_start, month_end)
        .await
        .map_err(|err| JsonResponse::<FinanceReport>::build().internal_server_error(err))?;
    let yearly = db::finance::income_between(pg_pool.get_ref(), year_start, year_end)
        .await
        .map_err(|err| JsonResponse::<FinanceReport>::build().internal_server_error(err))?;

    let report = FinanceReport {
        real: monthly.total,
        projection: projection(monthly.total, Utc::now().date_naive(), year, month),
        count: monthly.count,
        total_year: yearly.total,
    };

    Ok(JsonResponse::build().set_item(report).ok("OK"))
}

/// Half-open range `[first of month, first of next month)`.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
    ))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month_bounds(year, month) {
        Some((start, end)) => (end - start).num_days() as u32,
        None => 0,
    }
}

/// Linear extrapolation of the month-to-date daily average over the
/// remaining days, rounded to a whole amount. Only the month `today`
/// falls in can project; completed and future months return 0.
fn projection(real: f64, today: NaiveDate, year: i32, month: u32) -> i64 {
    if today.year() != year || today.month() != month {
        return 0;
    }

    let elapsed = today.day();
    let total_days = days_in_month(year, month);
    if elapsed >= total_days {
        return 0;
    }

    let daily_average = real / elapsed as f64;
    (daily_average * (total_days - elapsed) as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn month_bounds_are_half_open() {
        let (start, end) = month_bounds(2024, 7).unwrap();
        assert_eq!(start, date(2024, 7, 1));
        assert_eq!(end, date(2024, 8, 1));
    }

    #[test]
    fn december_wraps_into_the_next_year() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start, date(2024, 12, 1));
        assert_eq!(end, date(2025, 1, 1));
    }

    #[test]
    fn month_zero_is_rejected() {
        assert!(month_bounds(2024, 0).is_none());
        assert!(month_bounds(2024, 13).is_none());
    }

    #[test]
    fn day_counts_cover_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 1), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn projection_extrapolates_the_daily_average() {
        // 300 earned over the first 10 of 30 days: 30/day over 20 left.
        assert_eq!(projection(300.0, date(2024, 4, 10), 2024, 4), 600);
    }

    #[test]
    fn projection_rounds_to_a_whole_amount() {
        // 100 / 3 days * 28 remaining = 933.33...
        assert_eq!(projection(100.0, date(2024, 1, 3), 2024, 1), 933);
    }

    #[test]
    fn past_months_do_not_project() {
        assert_eq!(projection(500.0, date(2024, 8, 15), 2024, 7), 0);
        assert_eq!(projection(500.0, date(2025, 1, 2), 2024, 12), 0);
    }

    #[test]
    fn future_months_do_not_project() {
        assert_eq!(projection(500.0, date(2024, 6, 15), 2024, 7), 0);
    }

    #[test]
    fn completed_month_projects_zero() {
        assert_eq!(projection(500.0, date(2024, 4, 30), 2024, 4), 0);
    }

    #[test]
    fn zero_income_projects_zero() {
        assert_eq!(projection(0.0, date(2024, 4, 10), 2024, 4), 0);
    }
}
