use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApiErrorKind::BadRequest => "BadRequest",
            ApiErrorKind::Unauthorized => "Unauthorized",
            ApiErrorKind::Forbidden => "Forbidden",
            ApiErrorKind::NotFound => "NotFound",
            ApiErrorKind::Conflict => "Conflict",
            ApiErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

/// Error type returned by handlers and middleware, rendered as the API's
/// JSON error envelope.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError { kind: ApiErrorKind::BadRequest, message: msg.into() }
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        ApiError { kind: ApiErrorKind::Unauthorized, message: msg.into() }
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        ApiError { kind: ApiErrorKind::Forbidden, message: msg.into() }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ApiError { kind: ApiErrorKind::NotFound, message: msg.into() }
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        ApiError { kind: ApiErrorKind::Conflict, message: msg.into() }
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        ApiError { kind: ApiErrorKind::Internal, message: msg.into() }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Duplicate unique keys surface as 400 in this API, not 409.
        let status = match self.kind {
            ApiErrorKind::BadRequest | ApiErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ApiErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ApiErrorKind::NotFound => StatusCode::NOT_FOUND,
            ApiErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match self.kind {
            // Internal details are wrapped so the generic message shape matches
            // the global error handler contract.
            ApiErrorKind::Internal => json!({ "error": { "message": self.message } }),
            _ => json!({ "error": self.message }),
        };
        (status, axum::Json(body)).into_response()
    }
}

#[derive(Debug, Clone)]
pub enum ServiceError {
    NotFound(String),
    InvalidInput(String),
    InvalidCredentials,
    RoleMismatch(String),
    Conflict(String),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::InvalidCredentials => write!(f, "Invalid credentials"),
            ServiceError::RoleMismatch(msg) => write!(f, "Role Mismatch: {}", msg),
            ServiceError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// Allow conversion from RepositoryError to ServiceError
impl From<crate::repository::repository_error::RepositoryError> for ServiceError {
    fn from(err: crate::repository::repository_error::RepositoryError) -> Self {
        use crate::repository::repository_error::RepositoryError;
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::ValidationError(msg) => ServiceError::InvalidInput(msg),
            RepositoryError::AlreadyExists(msg) => ServiceError::Conflict(msg),
            RepositoryError::DatabaseError(msg) => ServiceError::InternalError(msg),
            RepositoryError::ConnectionError(msg) => ServiceError::InternalError(msg),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::InvalidInput(msg) => ApiError::bad_request(msg),
            ServiceError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            ServiceError::RoleMismatch(msg) => ApiError::forbidden(msg),
            ServiceError::Conflict(msg) => ApiError::conflict(msg),
            // Storage detail stays in the logs; callers get a generic message.
            ServiceError::InternalError(_) => ApiError::internal("Server error"),
        }
    }
}
