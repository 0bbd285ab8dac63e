use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    Extension,
};
use crate::dto::pickup_dto::SchedulePickupRequest;
use crate::model::user::CurrentUser;
use crate::service::pickup_service::{PickupService, PickupServiceImpl};
use crate::util::error::ApiError;

// Schedule a pickup (citizens only); required-field validation happens in
// the service.
pub async fn schedule_pickup_handler(
    State(service): State<Arc<PickupServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<SchedulePickupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let res = service.schedule(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

// Pickups belonging to the logged-in citizen
pub async fn my_pickups_handler(
    State(service): State<Arc<PickupServiceImpl>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<impl IntoResponse, ApiError> {
    let pickups = service.my_pickups(user.id).await?;
    Ok(Json(pickups))
}

// Pending pickups with citizen contact details (collector view)
pub async fn pending_pickups_handler(
    State(service): State<Arc<PickupServiceImpl>>,
) -> Result<impl IntoResponse, ApiError> {
    let pickups = service.pending_pickups().await?;
    Ok(Json(pickups))
}

// Pending and unassigned pickups (collector/admin view)
pub async fn available_pickups_handler(
    State(service): State<Arc<PickupServiceImpl>>,
) -> Result<impl IntoResponse, ApiError> {
    let pickups = service.available_pickups().await?;
    Ok(Json(pickups))
}
