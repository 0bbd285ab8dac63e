use chrono::{DateTime, Utc};
use serde::Serialize;

/// Append-only audit entry written by the report submission transaction.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityLogEntry {
    pub id: i64,
    pub user_id: i64,
    pub activity_type: String,
    pub description: String,
    pub points_earned: i64,
    pub created_at: DateTime<Utc>,
}

/// Append-only user-facing alert, also written by the submission transaction.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
