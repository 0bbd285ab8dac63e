use serde::{Deserialize, Serialize};

/// Fields arrive optional so absent and empty values both hit the
/// required-field check in the service.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulePickupRequest {
    /// ISO date, e.g. 2026-08-06
    pub pickup_date: Option<String>,
    /// 24h time, e.g. 14:30
    pub pickup_time: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePickupResponse {
    pub message: String,
    pub pickup_id: i64,
}
