use std::sync::Arc;

use axum::{routing::post, Router};

use crate::handler::auth_handler::{login_handler, signup_handler};
use crate::service::auth_service::AuthServiceImpl;

pub fn auth_router(service: Arc<AuthServiceImpl>) -> Router {
    // Public routes: these are what issue the tokens everything else checks
    Router::new()
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/login", post(login_handler))
        .with_state(service)
}
