//! End-to-end flows against a real PostgreSQL instance.
//!
//! These tests need a provisioned database (`DATABASE_URL`) and are ignored
//! by default; run them with `cargo test -- --ignored`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt; // for .oneshot()
use uuid::Uuid;

use pwms_backend::app::app::App;
use pwms_backend::config::JwtConfig;
use pwms_backend::model::activity::{ActivityLogEntry, Notification};
use pwms_backend::repository::report_repo::{PgReportRepository, ReportRepository};

async fn setup() -> (Router, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for flow tests");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("database connection");
    sqlx::migrate!().run(&pool).await.expect("migrations");
    (App::router(pool.clone(), JwtConfig::default()), pool)
}

async fn body_json(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

async fn signup_citizen(app: &Router, email: &str) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/signup")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "full_name": "Test Citizen",
                "email": email,
                "password": "password123"
            })
            .to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
}

async fn login(app: &Router, email: &str, role: Option<&str>) -> (StatusCode, Value) {
    let mut payload = json!({"email": email, "password": "password123"});
    if let Some(role) = role {
        payload["role"] = json!(role);
    }
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, body_json(resp.into_body()).await)
}

fn submit_report_request(token: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/reports")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_report_submission_awards_points_atomically() {
    let (app, pool) = setup().await;
    let email = unique_email("citizen");
    signup_citizen(&app, &email).await;

    let (status, login_body) = login(&app, &email, Some("citizen")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login_body["user"]["points"], 0);
    let token = login_body["token"].as_str().unwrap().to_string();
    let user_id = login_body["user"]["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(submit_report_request(
            &token,
            json!({"location": "Main St", "waste_type": "bottles"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_json(resp.into_body()).await;
    assert_eq!(body["pointsAwarded"], 10);
    assert_eq!(body["currentPoints"], 10);
    assert!(body["reportId"].as_i64().unwrap() > 0);

    // All four effects are visible together
    let points: i64 = sqlx::query_scalar("SELECT points FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(points, 10);

    let activities: Vec<ActivityLogEntry> = sqlx::query_as(
        "SELECT id, user_id, activity_type, description, points_earned, created_at
         FROM user_activities WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].activity_type, "report_submitted");
    assert_eq!(activities[0].description, "Reported bottles waste at Main St");
    assert_eq!(activities[0].points_earned, 10);

    let notifications: Vec<Notification> = sqlx::query_as(
        "SELECT id, user_id, message, notification_type, is_read, created_at
         FROM user_notifications WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "10 points earned for reporting waste");
    assert_eq!(notifications[0].notification_type, "points");
    assert!(!notifications[0].is_read);
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_concurrent_submissions_are_not_lost() {
    let (app, pool) = setup().await;
    let email = unique_email("racer");
    signup_citizen(&app, &email).await;

    let (_, login_body) = login(&app, &email, None).await;
    let token = login_body["token"].as_str().unwrap().to_string();
    let user_id = login_body["user"]["id"].as_i64().unwrap();

    sqlx::query("UPDATE users SET points = 5 WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let first = app.clone().oneshot(submit_report_request(
        &token,
        json!({"location": "North Park", "waste_type": "bags"}),
    ));
    let second = app.clone().oneshot(submit_report_request(
        &token,
        json!({"location": "South Park", "waste_type": "bottles"}),
    ));
    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap().status(), StatusCode::CREATED);
    assert_eq!(second.unwrap().status(), StatusCode::CREATED);

    // Relative increments never lose an update: 5 + 10 + 10
    let points: i64 = sqlx::query_scalar("SELECT points FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(points, 25);
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_missing_fields_rejected_before_any_write() {
    let (app, pool) = setup().await;
    let email = unique_email("strict");
    signup_citizen(&app, &email).await;

    let (_, login_body) = login(&app, &email, None).await;
    let token = login_body["token"].as_str().unwrap().to_string();
    let user_id = login_body["user"]["id"].as_i64().unwrap();

    let resp = app
        .clone()
        .oneshot(submit_report_request(&token, json!({"location": "Main St"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp.into_body()).await;
    assert_eq!(body["error"], "Location and waste type are required");

    // Nothing was written
    let reports: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM waste_reports WHERE reporter_id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(reports, 0);

    let points: i64 = sqlx::query_scalar("SELECT points FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(points, 0);
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_failed_submission_leaves_no_partial_rows() {
    let (_, pool) = setup().await;
    let repo = PgReportRepository::new(pool.clone());

    // Reporter id violates the foreign key, so the transaction cannot commit
    let missing_user = i64::MAX - 1;
    let result = repo
        .submit(missing_user, "Nowhere", "bottles", None)
        .await;
    assert!(result.is_err());

    let reports: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM waste_reports WHERE reporter_id = $1")
            .bind(missing_user)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(reports, 0);

    let activities: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM user_activities WHERE user_id = $1")
            .bind(missing_user)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(activities, 0);
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_login_role_mismatch_is_forbidden() {
    let (app, _) = setup().await;
    let email = unique_email("roles");
    signup_citizen(&app, &email).await;

    let (status, body) = login(&app, &email, Some("collector")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "User is not a collector. Please select correct role."
    );
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_citizen_cannot_access_staff_listing() {
    let (app, _) = setup().await;
    let email = unique_email("scoped");
    signup_citizen(&app, &email).await;

    let (_, login_body) = login(&app, &email, None).await;
    let token = login_body["token"].as_str().unwrap();

    let req = Request::builder()
        .uri("/api/reports")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body = body_json(resp.into_body()).await;
    assert_eq!(
        body["error"],
        "You do not have permission to perform this action"
    );
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_deactivated_user_is_rejected_despite_valid_token() {
    let (app, pool) = setup().await;
    let email = unique_email("inactive");
    signup_citizen(&app, &email).await;

    let (_, login_body) = login(&app, &email, None).await;
    let token = login_body["token"].as_str().unwrap().to_string();
    let user_id = login_body["user"]["id"].as_i64().unwrap();

    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    // Token is still cryptographically valid; the live re-check rejects it
    let req = Request::builder()
        .uri("/api/reports/my-reports")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(resp.into_body()).await;
    assert_eq!(body["error"], "User not found or inactive");
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_pickup_schedule_and_history() {
    let (app, _) = setup().await;
    let email = unique_email("pickup");
    signup_citizen(&app, &email).await;

    let (_, login_body) = login(&app, &email, None).await;
    let token = login_body["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/api/pickups/schedule")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            json!({
                "pickup_date": "2026-09-01",
                "pickup_time": "14:30",
                "address": "12 Riverside Drive"
            })
            .to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp.into_body()).await;
    let pickup_id = body["pickupId"].as_i64().unwrap();

    let req = Request::builder()
        .uri("/api/pickups/my-pickups")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp.into_body()).await;
    let pickups = body.as_array().unwrap();
    assert_eq!(pickups.len(), 1);
    assert_eq!(pickups[0]["id"].as_i64().unwrap(), pickup_id);
    assert_eq!(pickups[0]["status"], "pending");
}

#[tokio::test]
#[ignore = "requires a provisioned PostgreSQL (DATABASE_URL)"]
async fn test_pickup_invalid_date_rejected() {
    let (app, _) = setup().await;
    let email = unique_email("baddate");
    signup_citizen(&app, &email).await;

    let (_, login_body) = login(&app, &email, None).await;
    let token = login_body["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/api/pickups/schedule")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            json!({
                "pickup_date": "tomorrow",
                "pickup_time": "14:30",
                "address": "12 Riverside Drive"
            })
            .to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
