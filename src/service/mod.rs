pub mod auth_service;
pub mod pickup_service;
pub mod report_service;
