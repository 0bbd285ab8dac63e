use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handler::report_handler::{
    all_reports_handler, create_report_handler, my_reports_handler, recent_activity_handler,
    report_stats_handler,
};
use crate::middlewares::auth_middleware::{citizen_only, protect, staff_only, AuthState};
use crate::service::report_service::ReportServiceImpl;

pub fn report_router(service: Arc<ReportServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Citizen-only routes
    let citizen = Router::new()
        .route("/api/reports", post(create_report_handler))
        .route("/api/reports/my-reports", get(my_reports_handler))
        .route("/api/reports/stats", get(report_stats_handler))
        .route_layer(middleware::from_fn(citizen_only));

    // Admin/collector listing
    let staff = Router::new()
        .route("/api/reports", get(all_reports_handler))
        .route_layer(middleware::from_fn(staff_only));

    // Any authenticated role
    let authed = Router::new().route("/api/reports/recent-activity", get(recent_activity_handler));

    // `protect` is added last so it runs before the role checks above.
    citizen
        .merge(staff)
        .merge(authed)
        .route_layer(middleware::from_fn_with_state(auth_state, protect))
        .with_state(service)
}
