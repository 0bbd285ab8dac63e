use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use crate::dto::report_dto::{CreateReportRequest, RecentActivityQuery};
use crate::model::user::CurrentUser;
use crate::service::report_service::{ReportService, ReportServiceImpl};
use crate::util::error::ApiError;

// Create waste report (citizens only); required-field validation happens in
// the service, before the transaction starts.
pub async fn create_report_handler(
    State(service): State<Arc<ReportServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let res = service.submit_report(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

// Reports belonging to the logged-in citizen
pub async fn my_reports_handler(
    State(service): State<Arc<ReportServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let reports = service.my_reports(user.id).await?;
    Ok(Json(reports))
}

// All reports with reporter details (admin/collector view)
pub async fn all_reports_handler(
    State(service): State<Arc<ReportServiceImpl>>,
) -> Result<impl IntoResponse, ApiError> {
    let reports = service.all_reports().await?;
    Ok(Json(reports))
}

// Per-citizen report statistics
pub async fn report_stats_handler(
    State(service): State<Arc<ReportServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = service.stats(&user).await?;
    Ok(Json(stats))
}

// Recent activity feed for the dashboard
pub async fn recent_activity_handler(
    State(service): State<Arc<ReportServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<RecentActivityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let activities = service.recent_activity(user.id, query.limit).await?;
    Ok(Json(activities))
}
