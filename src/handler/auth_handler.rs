use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, SignupRequest};
use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::error::ApiError;

// Signup
pub async fn signup_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = payload.validate() {
        return Err(ApiError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.signup(payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(e) = payload.validate() {
        return Err(ApiError::bad_request(format!("Validation error: {}", e)));
    }
    let res = service.login(payload).await?;
    Ok(Json(res))
}
