use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::app_conf::AppConfig;
use crate::config::{DatabaseConfig, JwtConfig};
use crate::middlewares::auth_middleware::{log_request, AuthState};
use crate::repository::pickup_repo::PgPickupRepository;
use crate::repository::report_repo::PgReportRepository;
use crate::repository::user_repo::UserRepositoryImpl;
use crate::router::auth_router::auth_router;
use crate::router::pickup_router::pickup_router;
use crate::router::report_router::report_router;
use crate::service::auth_service::AuthServiceImpl;
use crate::service::pickup_service::PickupServiceImpl;
use crate::service::report_service::ReportServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let db_config = DatabaseConfig::from_env().expect("Database config error");

        let pool = PgPoolOptions::new()
            .max_connections(db_config.max_connections)
            .acquire_timeout(Duration::from_secs(db_config.connection_timeout_secs))
            .connect(&db_config.url)
            .await
            .expect("Database connection error");

        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Database migration error");
        info!("Database migrations applied");

        let router = Self::router(pool, jwt_config);
        App { config, router }
    }

    /// Wire repositories, services and routers over an existing pool.
    /// Split out from `new` so tests can assemble the full app themselves.
    pub fn router(pool: PgPool, jwt_config: JwtConfig) -> Router {
        let user_repo = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let report_repo = Arc::new(PgReportRepository::new(pool.clone()));
        let pickup_repo = Arc::new(PgPickupRepository::new(pool));
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));

        let auth_service = Arc::new(AuthServiceImpl::new(user_repo.clone(), jwt_utils.clone()));
        let report_service = Arc::new(ReportServiceImpl::new(report_repo));
        let pickup_service = Arc::new(PickupServiceImpl::new(pickup_repo));

        let auth_state = Arc::new(AuthState {
            jwt_utils,
            user_repo,
        });

        Router::new()
            .merge(auth_router(auth_service))
            .merge(report_router(report_service, auth_state.clone()))
            .merge(pickup_router(pickup_service, auth_state))
            .route("/", get(index_handler))
            .route("/health", get(health_handler))
            .fallback(route_not_found)
            .layer(middleware::from_fn(log_request))
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }
}

async fn index_handler() -> impl IntoResponse {
    Json(json!({
        "message": "🌱 Plastic Waste Management System API",
        "version": "1.0.0",
        "endpoints": {
            "auth": {
                "signup": "POST /api/auth/signup",
                "login": "POST /api/auth/login"
            },
            "reports": {
                "create": "POST /api/reports",
                "list": "GET /api/reports"
            },
            "pickups": {
                "schedule": "POST /api/pickups/schedule",
                "history": "GET /api/pickups/my-pickups"
            }
        }
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn route_not_found(req: Request) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": req.uri().to_string(),
            "method": req.method().as_str()
        })),
    )
}
