use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical appointment status. `Erased` is the soft-delete terminal
/// state; rows are only ever removed through the admin purge endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Finished,
    Canceled,
    Erased,
}

impl AppointmentStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Re-applying the current status is allowed and treated by callers
    /// as an idempotent no-op.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Canceled)
                | (Pending, Erased)
                | (Confirmed, Finished)
                | (Confirmed, Canceled)
                | (Confirmed, Erased)
                | (Finished, Erased)
                | (Canceled, Erased)
        )
    }

    /// An appointment still occupies its time slot only while active.
    pub fn is_active(self) -> bool {
        !matches!(self, AppointmentStatus::Canceled | AppointmentStatus::Erased)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Finished => write!(f, "finished"),
            AppointmentStatus::Canceled => write!(f, "canceled"),
            AppointmentStatus::Erased => write!(f, "erased"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown appointment status: {0}")]
pub struct ParseStatusError(String);

impl std::str::FromStr for AppointmentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "finished" => Ok(AppointmentStatus::Finished),
            "canceled" => Ok(AppointmentStatus::Canceled),
            "erased" => Ok(AppointmentStatus::Erased),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A booked appointment. `price` is fixed at creation time; later catalog
/// price changes never touch existing bookings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Appointment {
    pub id: String,
    pub user_email: String,
    #[serde(rename = "serviceName")]
    #[sqlx(rename = "service_name")]
    pub service_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;
    use super::*;
    use std::str::FromStr;

    #[test]
    fn pending_moves_forward_or_out() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Canceled));
        assert!(Pending.can_transition_to(Erased));
        assert!(!Pending.can_transition_to(Finished));
    }

    #[test]
    fn confirmed_finishes_or_cancels() {
        assert!(Confirmed.can_transition_to(Finished));
        assert!(Confirmed.can_transition_to(Canceled));
        assert!(Confirmed.can_transition_to(Erased));
        assert!(!Confirmed.can_transition_to(Pending));
    }

    #[test]
    fn finished_only_erases() {
        assert!(Finished.can_transition_to(Erased));
        assert!(!Finished.can_transition_to(Pending));
        assert!(!Finished.can_transition_to(Confirmed));
        assert!(!Finished.can_transition_to(Canceled));
    }

    #[test]
    fn canceled_only_erases() {
        assert!(Canceled.can_transition_to(Erased));
        assert!(!Canceled.can_transition_to(Confirmed));
        assert!(!Canceled.can_transition_to(Finished));
    }

    #[test]
    fn erased_is_terminal() {
        for next in [Pending, Confirmed, Finished, Canceled] {
            assert!(!Erased.can_transition_to(next));
        }
    }

    #[test]
    fn same_status_is_a_no_op() {
        for status in [Pending, Confirmed, Finished, Canceled, Erased] {
            assert!(status.can_transition_to(status));
        }
    }

    #[test]
    fn active_excludes_canceled_and_erased() {
        assert!(Pending.is_active());
        assert!(Confirmed.is_active());
        assert!(Finished.is_active());
        assert!(!Canceled.is_active());
        assert!(!Erased.is_active());
    }

    #[test]
    fn status_round_trips_through_text() {
        for status in [Pending, Confirmed, Finished, Canceled, Erased] {
            let parsed = AppointmentStatus::from_str(&status.to_string()).unwrap();
            assert_eq!(status, parsed);
        }
        assert!(AppointmentStatus::from_str("apagado").is_err());
    }
}
