use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::dto::report_dto::{
    ActivityFeedEntry, CreateReportRequest, CreateReportResponse, ReportStatsResponse,
};
use crate::model::report::{ReportWithReporter, WasteReport, REPORT_REWARD_POINTS};
use crate::model::user::CurrentUser;
use crate::repository::report_repo::{PgReportRepository, ReportRepository};
use crate::util::error::ServiceError;

const DEFAULT_ACTIVITY_LIMIT: i64 = 5;

#[async_trait]
pub trait ReportService: Send + Sync {
    async fn submit_report(
        &self,
        reporter_id: i64,
        req: CreateReportRequest,
    ) -> Result<CreateReportResponse, ServiceError>;

    async fn my_reports(&self, reporter_id: i64) -> Result<Vec<WasteReport>, ServiceError>;
    async fn all_reports(&self) -> Result<Vec<ReportWithReporter>, ServiceError>;
    async fn stats(&self, user: &CurrentUser) -> Result<ReportStatsResponse, ServiceError>;
    async fn recent_activity(
        &self,
        reporter_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<ActivityFeedEntry>, ServiceError>;
}

pub struct ReportServiceImpl {
    pub report_repo: Arc<PgReportRepository>,
}

impl ReportServiceImpl {
    pub fn new(report_repo: Arc<PgReportRepository>) -> Self {
        Self { report_repo }
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    #[instrument(skip(self, req), fields(reporter_id = reporter_id))]
    async fn submit_report(
        &self,
        reporter_id: i64,
        req: CreateReportRequest,
    ) -> Result<CreateReportResponse, ServiceError> {
        info!("Submitting waste report");

        // Required-field check runs before the transaction opens.
        let location = req.location.as_deref().map(str::trim).unwrap_or_default();
        let waste_type = req.waste_type.as_deref().map(str::trim).unwrap_or_default();
        if location.is_empty() || waste_type.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Location and waste type are required".to_string(),
            ));
        }

        let submitted = self
            .report_repo
            .submit(reporter_id, location, waste_type, req.description.as_deref())
            .await;
        let submitted = match submitted {
            Ok(s) => {
                info!(report_id = s.report_id, "Waste report committed");
                s
            }
            Err(e) => {
                error!("Report submission rolled back: {e}");
                return Err(e.into());
            }
        };

        Ok(CreateReportResponse {
            message: "Waste report submitted successfully".to_string(),
            report_id: submitted.report_id,
            points_awarded: REPORT_REWARD_POINTS,
            current_points: submitted.current_points,
        })
    }

    #[instrument(skip(self))]
    async fn my_reports(&self, reporter_id: i64) -> Result<Vec<WasteReport>, ServiceError> {
        let reports = self.report_repo.list_by_reporter(reporter_id).await?;
        Ok(reports)
    }

    #[instrument(skip(self))]
    async fn all_reports(&self) -> Result<Vec<ReportWithReporter>, ServiceError> {
        let reports = self.report_repo.list_all().await?;
        Ok(reports)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn stats(&self, user: &CurrentUser) -> Result<ReportStatsResponse, ServiceError> {
        let stats = self.report_repo.stats_for(user.id).await?;
        Ok(ReportStatsResponse {
            stats,
            current_points: user.points,
        })
    }

    #[instrument(skip(self))]
    async fn recent_activity(
        &self,
        reporter_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<ActivityFeedEntry>, ServiceError> {
        let limit = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT).clamp(1, 50);
        let reports = self
            .report_repo
            .recent_by_reporter(reporter_id, limit)
            .await?;

        let activities = reports
            .into_iter()
            .map(|report| ActivityFeedEntry {
                entry_type: "report".to_string(),
                description: format!(
                    "Reported {} waste at {}",
                    report.waste_type, report.location
                ),
                status: report.status,
                date: report.created_at,
                icon: "\u{1F4CD}".to_string(),
            })
            .collect();

        Ok(activities)
    }
}
