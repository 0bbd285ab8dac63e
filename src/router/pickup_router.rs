use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handler::pickup_handler::{
    available_pickups_handler, my_pickups_handler, pending_pickups_handler,
    schedule_pickup_handler,
};
use crate::middlewares::auth_middleware::{citizen_only, collector_only, protect, staff_only, AuthState};
use crate::service::pickup_service::PickupServiceImpl;

pub fn pickup_router(service: Arc<PickupServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    let citizen = Router::new()
        .route("/api/pickups/schedule", post(schedule_pickup_handler))
        .route("/api/pickups/my-pickups", get(my_pickups_handler))
        .route_layer(middleware::from_fn(citizen_only));

    let collector = Router::new()
        .route("/api/pickups/pending", get(pending_pickups_handler))
        .route_layer(middleware::from_fn(collector_only));

    let staff = Router::new()
        .route("/api/pickups/available", get(available_pickups_handler))
        .route_layer(middleware::from_fn(staff_only));

    citizen
        .merge(collector)
        .merge(staff)
        .route_layer(middleware::from_fn_with_state(auth_state, protect))
        .with_state(service)
}
