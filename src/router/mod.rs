pub mod auth_router;
pub mod pickup_router;
pub mod report_router;
