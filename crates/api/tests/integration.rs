//! Integration tests for API routes.
//!
//! Uses `tower::ServiceExt` to test Axum routes without a real HTTP server.
//! The state is built over the in-memory store with zero-latency simulated
//! channels, so no external infrastructure is required.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use herald_api::routes::create_router;
use herald_api::state::AppState;
use herald_common::config::AppConfig;
use herald_delivery::SimulatedEmailChannel;
use herald_directory::HttpUserDirectory;
use herald_engine::Dispatcher;
use herald_engine::store::InMemoryNotificationStore;
use herald_telemetry::TelemetryClient;

// ============================================================
// Helpers
// ============================================================

fn test_config() -> AppConfig {
    AppConfig {
        http_port: 0,
        database_url: None,
        db_max_connections: 5,
        user_service_url: "http://127.0.0.1:1".to_string(),
        user_service_timeout_ms: 200,
        telemetry_service_url: "http://127.0.0.1:1".to_string(),
        service_name: "notification-service".to_string(),
        email_latency_ms: 0,
        email_failure_rate: 0.0,
        sms_latency_ms: 0,
        sms_failure_rate: 0.0,
    }
}

/// Build an AppState over the in-memory store.
///
/// `user_service_url` controls enrichment: point it at a wiremock server
/// for the happy path or leave the unroutable default for degraded mode.
/// `email_failure_rate` of 0.0 or 1.0 makes delivery deterministic.
fn build_test_state(user_service_url: &str, email_failure_rate: f64) -> AppState {
    let config = AppConfig {
        user_service_url: user_service_url.to_string(),
        email_failure_rate,
        ..test_config()
    };

    let telemetry = Arc::new(TelemetryClient::new(
        config.telemetry_service_url.clone(),
        config.service_name.clone(),
    ));
    let directory = HttpUserDirectory::new(
        config.user_service_url.clone(),
        Duration::from_millis(config.user_service_timeout_ms),
    )
    .unwrap();
    let email = SimulatedEmailChannel::from_config(&config, telemetry.clone());

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(InMemoryNotificationStore::new()),
        Arc::new(directory),
        Arc::new(email),
        telemetry.clone(),
    ));

    AppState::new(dispatcher, telemetry, config)
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

// ============================================================
// Routes
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let state = build_test_state("http://127.0.0.1:1", 0.0);
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "herald-api");
}

#[tokio::test]
async fn test_order_confirmation_returns_terminal_record() {
    let state = build_test_state("http://127.0.0.1:1", 0.0);
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/notifications/order-confirmation",
            serde_json::json!({"orderId": 123, "userId": 7}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["type"], "ORDER_CONFIRMATION");
    assert_eq!(json["userId"], 7);
    assert!(
        json["subject"]
            .as_str()
            .unwrap()
            .contains("Order Confirmation - Order #123")
    );
    assert_eq!(json["status"], "SENT");
    assert!(json["sentAt"].is_string());
    // Directory is unreachable in this state: degraded but delivered.
    assert!(json["recipientEmail"].is_null());
}

#[tokio::test]
async fn test_delivery_failure_reports_failed_record() {
    let state = build_test_state("http://127.0.0.1:1", 1.0);
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/notifications/payment-failure",
            serde_json::json!({"paymentId": 1, "userId": 2, "orderId": 3}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "FAILED");
    assert!(json["sentAt"].is_null());
}

#[tokio::test]
async fn test_payment_confirmation_scenario() {
    let state = build_test_state("http://127.0.0.1:1", 0.0);
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/notifications/payment-confirmation",
            serde_json::json!({"paymentId": 999, "userId": 4, "orderId": 555}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["type"], "PAYMENT_CONFIRMATION");
    assert!(json["subject"].as_str().unwrap().contains("Order #555"));
    let body = json["body"].as_str().unwrap();
    assert!(body.contains("Payment ID: 999"));
    assert!(body.contains("order #555"));
}

#[tokio::test]
async fn test_enrichment_populates_recipient_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 4,
            "email": "dana@example.com",
            "phoneNumber": "+15557654321",
            "firstName": "Dana",
            "lastName": "Jones"
        })))
        .mount(&server)
        .await;

    let state = build_test_state(&server.uri(), 0.0);
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/notifications/order-confirmation",
            serde_json::json!({"orderId": 1, "userId": 4}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["recipientEmail"], "dana@example.com");
    assert_eq!(json["recipientPhone"], "+15557654321");
}

#[tokio::test]
async fn test_unknown_notification_id_is_404() {
    let state = build_test_state("http://127.0.0.1:1", 0.0);
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/notifications/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("not found")
    );
}

#[tokio::test]
async fn test_listing_routes() {
    let state = build_test_state("http://127.0.0.1:1", 0.0);

    // Dispatch two notifications for user 10, one for user 11.
    for (uri, body) in [
        (
            "/api/notifications/order-confirmation",
            serde_json::json!({"orderId": 1, "userId": 10}),
        ),
        (
            "/api/notifications/order-cancellation",
            serde_json::json!({"orderId": 2, "userId": 10}),
        ),
        (
            "/api/notifications/refund-confirmation",
            serde_json::json!({"paymentId": 5, "userId": 11, "orderId": 3}),
        ),
    ] {
        let app = create_router(state.clone());
        let response = app.oneshot(post_json(uri, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // 1. List for user 10
    let app = create_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/notifications/user/10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = response_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 2);

    // 2. Empty list for an unknown user
    let app = create_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/notifications/user/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let list = response_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    // 3. List all
    let app = create_router(state.clone());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/notifications")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let list = response_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_order_status_route_carries_status_text() {
    let state = build_test_state("http://127.0.0.1:1", 0.0);
    let app = create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/notifications/order-status",
            serde_json::json!({"orderId": 55, "userId": 2, "status": "SHIPPED"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["type"], "ORDER_STATUS_UPDATE");
    assert!(
        json["body"]
            .as_str()
            .unwrap()
            .contains("updated to: SHIPPED")
    );
}
