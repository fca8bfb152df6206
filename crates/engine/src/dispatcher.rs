//! Dispatch pipeline.
//!
//! Turns one commerce event into one persisted, status-tracked notification:
//! 1. Render subject/body from the kind's template
//! 2. Best-effort enrichment with recipient contact details
//! 3. First persist (fatal on failure — no record exists yet)
//! 4. Delivery attempt (outcome becomes the terminal status, never an error)
//! 5. Second persist of the final record (fatal on failure — the outcome
//!    would otherwise be lost)

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use herald_common::error::AppError;
use herald_common::types::{NewNotification, Notification, NotificationKind, NotificationStatus};
use herald_delivery::DeliveryChannel;
use herald_directory::UserDirectory;
use herald_telemetry::TelemetryClient;

use crate::store::{NotificationStore, StoreError};
use crate::templates;

/// Failures a dispatch can surface to its caller.
///
/// Enrichment and delivery failures are absorbed into the record's state;
/// only the two persistence steps are fatal, and they are distinguishable
/// because they mean different things: `Persist` left no record at all,
/// `RecordOutcome` left a record whose delivery outcome is at risk of
/// being lost.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to persist notification: {0}")]
    Persist(#[source] StoreError),

    #[error("failed to record delivery outcome for notification {id}: {source}")]
    RecordOutcome {
        id: Uuid,
        #[source]
        source: StoreError,
    },
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Orchestrates the dispatch pipeline over pluggable collaborators.
pub struct Dispatcher {
    store: Arc<dyn NotificationStore>,
    directory: Arc<dyn UserDirectory>,
    channel: Arc<dyn DeliveryChannel>,
    telemetry: Arc<TelemetryClient>,
}

impl Dispatcher {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        directory: Arc<dyn UserDirectory>,
        channel: Arc<dyn DeliveryChannel>,
        telemetry: Arc<TelemetryClient>,
    ) -> Self {
        Self {
            store,
            directory,
            channel,
            telemetry,
        }
    }

    pub async fn send_order_confirmation(
        &self,
        order_id: i64,
        user_id: i64,
    ) -> Result<Notification, DispatchError> {
        let (subject, body) = templates::order_confirmation(order_id);
        self.dispatch(NewNotification::new(
            user_id,
            NotificationKind::OrderConfirmation,
            subject,
            body,
        ))
        .await
    }

    pub async fn send_order_status_update(
        &self,
        order_id: i64,
        user_id: i64,
        status: &str,
    ) -> Result<Notification, DispatchError> {
        let (subject, body) = templates::order_status_update(order_id, status);
        self.dispatch(NewNotification::new(
            user_id,
            NotificationKind::OrderStatusUpdate,
            subject,
            body,
        ))
        .await
    }

    pub async fn send_order_cancellation(
        &self,
        order_id: i64,
        user_id: i64,
    ) -> Result<Notification, DispatchError> {
        let (subject, body) = templates::order_cancellation(order_id);
        self.dispatch(NewNotification::new(
            user_id,
            NotificationKind::OrderCancellation,
            subject,
            body,
        ))
        .await
    }

    pub async fn send_payment_confirmation(
        &self,
        payment_id: i64,
        user_id: i64,
        order_id: i64,
    ) -> Result<Notification, DispatchError> {
        let (subject, body) = templates::payment_confirmation(payment_id, order_id);
        self.dispatch(NewNotification::new(
            user_id,
            NotificationKind::PaymentConfirmation,
            subject,
            body,
        ))
        .await
    }

    pub async fn send_payment_failure(
        &self,
        payment_id: i64,
        user_id: i64,
        order_id: i64,
    ) -> Result<Notification, DispatchError> {
        let (subject, body) = templates::payment_failure(payment_id, order_id);
        self.dispatch(NewNotification::new(
            user_id,
            NotificationKind::PaymentFailure,
            subject,
            body,
        ))
        .await
    }

    pub async fn send_refund_confirmation(
        &self,
        payment_id: i64,
        user_id: i64,
        order_id: i64,
    ) -> Result<Notification, DispatchError> {
        let (subject, body) = templates::refund_confirmation(payment_id, order_id);
        self.dispatch(NewNotification::new(
            user_id,
            NotificationKind::RefundConfirmation,
            subject,
            body,
        ))
        .await
    }

    /// Run one notification through the full pipeline.
    async fn dispatch(&self, mut new: NewNotification) -> Result<Notification, DispatchError> {
        // Enrichment is best-effort: a missing or unreachable user still
        // gets their notification recorded and attempted.
        let lookup_started = Instant::now();
        match self.directory.get_user_by_id(new.user_id).await {
            Ok(user) => {
                new.recipient_email = user.email;
                new.recipient_phone = user.phone_number;
                self.telemetry.record_service_call(
                    "user-service",
                    "get_user_by_id",
                    "GET",
                    &format!("/api/users/{}", new.user_id),
                    lookup_started.elapsed().as_millis() as u64,
                    200,
                );
            }
            Err(err) => {
                tracing::warn!(
                    user_id = new.user_id,
                    error = %err,
                    "Contact lookup failed; dispatching without recipient details"
                );
                self.telemetry
                    .log_event(&format!("User lookup failed: {err}"), "WARN");
            }
        }

        let mut notification = self
            .store
            .create(new)
            .await
            .map_err(DispatchError::Persist)?;

        tracing::info!(
            notification_id = %notification.id,
            user_id = notification.user_id,
            kind = %notification.kind,
            "Notification recorded"
        );

        // The delivery outcome is state, not an error: the record goes
        // terminal either way and the caller sees which way it went.
        match self.channel.deliver(&notification).await {
            Ok(()) => {
                notification.status = NotificationStatus::Sent;
                notification.sent_at = Some(Utc::now());
            }
            Err(err) => {
                notification.status = NotificationStatus::Failed;
                tracing::warn!(
                    notification_id = %notification.id,
                    channel = self.channel.name(),
                    error = %err,
                    "Delivery failed"
                );
                self.telemetry
                    .log_event(&format!("Delivery failed: {err}"), "ERROR");
            }
        }

        let id = notification.id;
        self.store
            .update(&notification)
            .await
            .map_err(|source| DispatchError::RecordOutcome { id, source })
    }

    pub async fn get_notification(&self, id: Uuid) -> Result<Notification, StoreError> {
        self.store.find_by_id(id).await
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Notification>, StoreError> {
        self.store.find_by_user_id(user_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<Notification>, StoreError> {
        self.store.find_all().await
    }
}
