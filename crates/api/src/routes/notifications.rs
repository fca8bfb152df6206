//! Notification dispatch and lookup routes.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use herald_common::error::AppError;
use herald_common::types::Notification;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/notifications/order-confirmation",
            post(send_order_confirmation),
        )
        .route("/api/notifications/order-status", post(send_order_status))
        .route(
            "/api/notifications/order-cancellation",
            post(send_order_cancellation),
        )
        .route(
            "/api/notifications/payment-confirmation",
            post(send_payment_confirmation),
        )
        .route(
            "/api/notifications/payment-failure",
            post(send_payment_failure),
        )
        .route(
            "/api/notifications/refund-confirmation",
            post(send_refund_confirmation),
        )
        .route("/api/notifications", get(get_all_notifications))
        .route("/api/notifications/{id}", get(get_notification_by_id))
        .route(
            "/api/notifications/user/{user_id}",
            get(get_notifications_by_user),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmationRequest {
    pub order_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusRequest {
    pub order_id: i64,
    pub user_id: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancellationRequest {
    pub order_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmationRequest {
    pub payment_id: i64,
    pub user_id: i64,
    pub order_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFailureRequest {
    pub payment_id: i64,
    pub user_id: i64,
    pub order_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundConfirmationRequest {
    pub payment_id: i64,
    pub user_id: i64,
    pub order_id: i64,
}

/// POST /api/notifications/order-confirmation
async fn send_order_confirmation(
    State(state): State<AppState>,
    Json(request): Json<OrderConfirmationRequest>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .dispatcher
        .send_order_confirmation(request.order_id, request.user_id)
        .await?;
    Ok(Json(notification))
}

/// POST /api/notifications/order-status
async fn send_order_status(
    State(state): State<AppState>,
    Json(request): Json<OrderStatusRequest>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .dispatcher
        .send_order_status_update(request.order_id, request.user_id, &request.status)
        .await?;
    Ok(Json(notification))
}

/// POST /api/notifications/order-cancellation
async fn send_order_cancellation(
    State(state): State<AppState>,
    Json(request): Json<OrderCancellationRequest>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .dispatcher
        .send_order_cancellation(request.order_id, request.user_id)
        .await?;
    Ok(Json(notification))
}

/// POST /api/notifications/payment-confirmation
async fn send_payment_confirmation(
    State(state): State<AppState>,
    Json(request): Json<PaymentConfirmationRequest>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .dispatcher
        .send_payment_confirmation(request.payment_id, request.user_id, request.order_id)
        .await?;
    Ok(Json(notification))
}

/// POST /api/notifications/payment-failure
async fn send_payment_failure(
    State(state): State<AppState>,
    Json(request): Json<PaymentFailureRequest>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .dispatcher
        .send_payment_failure(request.payment_id, request.user_id, request.order_id)
        .await?;
    Ok(Json(notification))
}

/// POST /api/notifications/refund-confirmation
async fn send_refund_confirmation(
    State(state): State<AppState>,
    Json(request): Json<RefundConfirmationRequest>,
) -> Result<Json<Notification>, AppError> {
    let notification = state
        .dispatcher
        .send_refund_confirmation(request.payment_id, request.user_id, request.order_id)
        .await?;
    Ok(Json(notification))
}

/// GET /api/notifications/:id
async fn get_notification_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Notification>, AppError> {
    let notification = state.dispatcher.get_notification(id).await?;
    Ok(Json(notification))
}

/// GET /api/notifications/user/:user_id
async fn get_notifications_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = state.dispatcher.list_for_user(user_id).await?;
    Ok(Json(notifications))
}

/// GET /api/notifications
async fn get_all_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, AppError> {
    let notifications = state.dispatcher.list_all().await?;
    Ok(Json(notifications))
}
