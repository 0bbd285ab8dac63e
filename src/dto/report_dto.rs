use serde::{Deserialize, Serialize};

use crate::model::report::{ReportStats, ReportStatus};

/// Fields arrive optional so an absent field and an empty one fail the same
/// way: the required-field check in the service, before any write begins.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportRequest {
    pub location: Option<String>,
    pub waste_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportResponse {
    pub message: String,
    pub report_id: i64,
    pub points_awarded: i64,
    pub current_points: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportStatsResponse {
    #[serde(flatten)]
    pub stats: ReportStats,
    #[serde(rename = "currentPoints")]
    pub current_points: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentActivityQuery {
    pub limit: Option<i64>,
}

/// Dashboard feed entry derived from the citizen's latest reports.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityFeedEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub description: String,
    pub status: ReportStatus,
    pub date: chrono::DateTime<chrono::Utc>,
    pub icon: String,
}
