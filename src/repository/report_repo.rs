use async_trait::async_trait;
use sqlx::PgPool;

use crate::model::report::{ReportStats, ReportWithReporter, WasteReport, REPORT_REWARD_POINTS};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Outcome of a committed report submission.
#[derive(Debug, Clone)]
pub struct SubmittedReport {
    pub report_id: i64,
    pub current_points: i64,
}

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persist a report and its reward side effects as one atomic unit:
    /// report row, points increment, activity entry, notification. Either
    /// all four commit or none of them do.
    async fn submit(
        &self,
        reporter_id: i64,
        location: &str,
        waste_type: &str,
        description: Option<&str>,
    ) -> RepositoryResult<SubmittedReport>;

    async fn list_by_reporter(&self, reporter_id: i64) -> RepositoryResult<Vec<WasteReport>>;
    async fn list_all(&self) -> RepositoryResult<Vec<ReportWithReporter>>;
    async fn stats_for(&self, reporter_id: i64) -> RepositoryResult<ReportStats>;
    async fn recent_by_reporter(
        &self,
        reporter_id: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<WasteReport>>;
}

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        PgReportRepository { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn submit(
        &self,
        reporter_id: i64,
        location: &str,
        waste_type: &str,
        description: Option<&str>,
    ) -> RepositoryResult<SubmittedReport> {
        // Dropping the transaction before commit rolls every statement back,
        // so an error on any `?` below undoes the whole submission.
        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;

        let report_id: i64 = sqlx::query_scalar(
            "INSERT INTO waste_reports (reporter_id, location, waste_type, description)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(reporter_id)
        .bind(location)
        .bind(waste_type)
        .bind(description)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        // Relative increment: concurrent submissions serialize on the row
        // lock instead of racing a stale read.
        let current_points: i64 = sqlx::query_scalar(
            "UPDATE users SET points = points + $1 WHERE id = $2 RETURNING points",
        )
        .bind(REPORT_REWARD_POINTS)
        .bind(reporter_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        let activity_description = match description {
            Some(extra) => format!("Reported {} waste at {}: {}", waste_type, location, extra),
            None => format!("Reported {} waste at {}", waste_type, location),
        };
        sqlx::query(
            "INSERT INTO user_activities (user_id, activity_type, description, points_earned)
             VALUES ($1, 'report_submitted', $2, $3)",
        )
        .bind(reporter_id)
        .bind(&activity_description)
        .bind(REPORT_REWARD_POINTS)
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        sqlx::query(
            "INSERT INTO user_notifications (user_id, message, notification_type)
             VALUES ($1, $2, 'points')",
        )
        .bind(reporter_id)
        .bind(format!("{} points earned for reporting waste", REPORT_REWARD_POINTS))
        .execute(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(SubmittedReport {
            report_id,
            current_points,
        })
    }

    async fn list_by_reporter(&self, reporter_id: i64) -> RepositoryResult<Vec<WasteReport>> {
        let reports = sqlx::query_as::<_, WasteReport>(
            "SELECT id, reporter_id, location, waste_type, description, status, created_at
             FROM waste_reports
             WHERE reporter_id = $1
             ORDER BY created_at DESC",
        )
        .bind(reporter_id)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(reports)
    }

    async fn list_all(&self) -> RepositoryResult<Vec<ReportWithReporter>> {
        let reports = sqlx::query_as::<_, ReportWithReporter>(
            "SELECT r.id, r.location, r.waste_type, r.status, r.created_at,
                    u.full_name AS reporter_name, u.points AS reporter_points
             FROM waste_reports r
             JOIN users u ON r.reporter_id = u.id
             ORDER BY r.created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(reports)
    }

    async fn stats_for(&self, reporter_id: i64) -> RepositoryResult<ReportStats> {
        let stats = sqlx::query_as::<_, ReportStats>(
            "SELECT COUNT(*) AS total_reports,
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending_reports,
                    COUNT(*) FILTER (WHERE status = 'resolved') AS resolved_reports,
                    COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled_reports,
                    MAX(created_at) AS last_report_date
             FROM waste_reports
             WHERE reporter_id = $1",
        )
        .bind(reporter_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(stats)
    }

    async fn recent_by_reporter(
        &self,
        reporter_id: i64,
        limit: i64,
    ) -> RepositoryResult<Vec<WasteReport>> {
        let reports = sqlx::query_as::<_, WasteReport>(
            "SELECT id, reporter_id, location, waste_type, description, status, created_at
             FROM waste_reports
             WHERE reporter_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(reporter_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        Ok(reports)
    }
}
