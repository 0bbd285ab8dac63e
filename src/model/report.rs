use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Points credited to a citizen for each accepted waste report.
pub const REPORT_REWARD_POINTS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WasteReport {
    pub id: i64,
    pub reporter_id: i64,
    pub location: String,
    pub waste_type: String,
    pub description: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Report row joined with its reporter, for the admin/collector listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReportWithReporter {
    pub id: i64,
    pub location: String,
    pub waste_type: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub reporter_name: String,
    pub reporter_points: i64,
}

/// Per-citizen aggregate over their reports.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ReportStats {
    pub total_reports: i64,
    pub pending_reports: i64,
    pub resolved_reports: i64,
    pub cancelled_reports: i64,
    pub last_report_date: Option<DateTime<Utc>>,
}
