use crate::models;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_valid::Validate;
use uuid::Uuid;

#[derive(Debug, Deserialize, Validate)]
pub struct Appointment {
    /// Client apps generate their own ids; one is minted when absent.
    pub id: Option<String>,
    #[validate(min_length = 1)]
    pub user_email: String,
    #[serde(rename = "serviceName")]
    #[validate(min_length = 1)]
    pub service_name: String,
    pub date: NaiveDate,
    #[validate(min_length = 1)]
    pub time: String,
    pub status: Option<models::AppointmentStatus>,
    #[validate(minimum = 0.0)]
    pub price: f64,
}

impl From<Appointment> for models::Appointment {
    fn from(form: Appointment) -> Self {
        models::Appointment {
            id: form.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_email: form.user_email,
            service_name: form.service_name,
            date: form.date,
            time: form.time,
            status: form.status.unwrap_or(models::AppointmentStatus::Pending),
            price: form.price,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: models::AppointmentStatus,
}
