use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of transactional notifications the service dispatches.
///
/// `AccountWelcome` and `PasswordReset` are defined for account flows but
/// no dispatch entry point produces them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum NotificationKind {
    OrderConfirmation,
    OrderStatusUpdate,
    OrderCancellation,
    PaymentConfirmation,
    PaymentFailure,
    RefundConfirmation,
    AccountWelcome,
    PasswordReset,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::OrderConfirmation => write!(f, "order_confirmation"),
            NotificationKind::OrderStatusUpdate => write!(f, "order_status_update"),
            NotificationKind::OrderCancellation => write!(f, "order_cancellation"),
            NotificationKind::PaymentConfirmation => write!(f, "payment_confirmation"),
            NotificationKind::PaymentFailure => write!(f, "payment_failure"),
            NotificationKind::RefundConfirmation => write!(f, "refund_confirmation"),
            NotificationKind::AccountWelcome => write!(f, "account_welcome"),
            NotificationKind::PasswordReset => write!(f, "password_reset"),
        }
    }
}

/// Delivery status state machine: `Pending` → `Sent` | `Failed`.
///
/// `Retry` is reserved for manual re-dispatch tooling; the dispatch
/// pipeline itself never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
    Retry,
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationStatus::Pending => write!(f, "pending"),
            NotificationStatus::Sent => write!(f, "sent"),
            NotificationStatus::Failed => write!(f, "failed"),
            NotificationStatus::Retry => write!(f, "retry"),
        }
    }
}

/// The durable record of one dispatch attempt.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub subject: String,
    pub body: String,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
    /// Set exactly once, on successful delivery.
    pub sent_at: Option<DateTime<Utc>>,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
}

/// A notification that has not been persisted yet — the store assigns the
/// identifier on create.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: i64,
    pub kind: NotificationKind,
    pub subject: String,
    pub body: String,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
    pub recipient_email: Option<String>,
    pub recipient_phone: Option<String>,
}

impl NewNotification {
    /// Construct a pending notification stamped with the current time.
    pub fn new(
        user_id: i64,
        kind: NotificationKind,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            kind,
            subject: subject.into(),
            body: body.into(),
            status: NotificationStatus::Pending,
            created_at: Utc::now(),
            recipient_email: None,
            recipient_phone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_starts_pending() {
        let new = NewNotification::new(7, NotificationKind::OrderConfirmation, "s", "b");
        assert_eq!(new.status, NotificationStatus::Pending);
        assert!(new.recipient_email.is_none());
        assert!(new.recipient_phone.is_none());
    }

    #[test]
    fn test_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&NotificationKind::PaymentConfirmation).unwrap();
        assert_eq!(json, "\"PAYMENT_CONFIRMATION\"");
    }

    #[test]
    fn test_notification_json_field_names() {
        let n = Notification {
            id: Uuid::new_v4(),
            user_id: 4,
            kind: NotificationKind::OrderConfirmation,
            subject: "s".to_string(),
            body: "b".to_string(),
            status: NotificationStatus::Sent,
            created_at: Utc::now(),
            sent_at: Some(Utc::now()),
            recipient_email: None,
            recipient_phone: None,
        };
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["type"], "ORDER_CONFIRMATION");
        assert_eq!(value["status"], "SENT");
        assert_eq!(value["userId"], 4);
        assert!(value["sentAt"].is_string());
    }
}
