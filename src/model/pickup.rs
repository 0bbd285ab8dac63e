use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pickup_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PickupStatus {
    Pending,
    Collected,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PickupRequest {
    pub id: i64,
    pub user_id: i64,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub address: String,
    pub notes: Option<String>,
    pub status: PickupStatus,
    pub collector_id: Option<i64>,
    pub points_earned: i64,
    pub created_at: DateTime<Utc>,
}

/// Pending pickup joined with the requesting citizen, for collector views.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PickupWithCitizen {
    pub id: i64,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub address: String,
    pub notes: Option<String>,
    pub status: PickupStatus,
    pub citizen_name: String,
    pub citizen_phone: Option<String>,
}
