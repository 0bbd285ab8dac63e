use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{error, info};

use crate::model::user::{CurrentUser, UserRole};
use crate::repository::user_repo::{UserRepository, UserRepositoryImpl};
use crate::util::error::ApiError;
use crate::util::jwt::{JwtError, JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_repo: Arc<UserRepositoryImpl>,
}

fn auth_error(err: JwtError) -> ApiError {
    match err {
        JwtError::MissingToken => ApiError::unauthorized("Not authorized - no token"),
        JwtError::TokenExpired => ApiError::unauthorized("Token expired. Please login again."),
        JwtError::InvalidToken => ApiError::unauthorized("Invalid token"),
        _ => ApiError::unauthorized("Not authorized"),
    }
}

/// Auth gate: resolves the bearer token to a live, active user record and
/// attaches it to the request. The token's role claim is never trusted on
/// its own; the store is re-read on every request so deactivation takes
/// effect before the token expires.
pub async fn protect(
    State(state): State<Arc<AuthState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok());

    let token = state
        .jwt_utils
        .extract_bearer_token(auth_header)
        .map_err(auth_error)?;
    let claims = state
        .jwt_utils
        .validate_access_token(&token)
        .map_err(auth_error)?;

    let user = state
        .user_repo
        .find_active_by_id(claims.sub)
        .await
        .map_err(|e| {
            error!("Auth middleware failed to load user: {e}");
            ApiError::unauthorized("Not authorized")
        })?
        .ok_or_else(|| ApiError::unauthorized("User not found or inactive"))?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

async fn restrict_to(
    allowed: &[UserRole],
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| ApiError::unauthorized("Not authorized"))?;

    // Checks the live role loaded by `protect`, not the token claim.
    if !allowed.contains(&user.role) {
        return Err(ApiError::forbidden(
            "You do not have permission to perform this action",
        ));
    }
    Ok(next.run(req).await)
}

pub async fn citizen_only(req: Request, next: Next) -> Result<Response, ApiError> {
    restrict_to(&[UserRole::Citizen], req, next).await
}

pub async fn collector_only(req: Request, next: Next) -> Result<Response, ApiError> {
    restrict_to(&[UserRole::Collector], req, next).await
}

pub async fn staff_only(req: Request, next: Next) -> Result<Response, ApiError> {
    restrict_to(&[UserRole::Admin, UserRole::Collector], req, next).await
}

/// Request-line logging for every route.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    info!("{} {} -> {}", method, uri, response.status());
    response
}
