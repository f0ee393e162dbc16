use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One key-value pair of salon configuration (business hours, contact
/// info, time slots). Values are often JSON-encoded strings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SalonConfig {
    pub id: i32,
    pub config_key: String,
    pub config_value: String,
    pub updated_at: DateTime<Utc>,
}
