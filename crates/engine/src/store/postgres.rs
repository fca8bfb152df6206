//! PostgreSQL store backend.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use herald_common::types::{NewNotification, Notification, NotificationKind, NotificationStatus};

use super::{NotificationStore, StoreError};

pub struct PgNotificationStore {
    pool: PgPool,
}

impl PgNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn create(&self, new: NewNotification) -> Result<Notification, StoreError> {
        let id = Uuid::new_v4();

        let notification: Notification = sqlx::query_as(
            r#"
            INSERT INTO notifications
                (id, user_id, kind, subject, body, status, created_at,
                 recipient_email, recipient_phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new.user_id)
        .bind(new.kind.to_string())
        .bind(&new.subject)
        .bind(&new.body)
        .bind(new.status.to_string())
        .bind(new.created_at)
        .bind(&new.recipient_email)
        .bind(&new.recipient_phone)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            notification_id = %notification.id,
            user_id = notification.user_id,
            kind = %notification.kind,
            "Notification created"
        );

        Ok(notification)
    }

    async fn update(&self, notification: &Notification) -> Result<Notification, StoreError> {
        // Identity fields (id, user_id, kind, created_at) are immutable.
        let updated: Option<Notification> = sqlx::query_as(
            r#"
            UPDATE notifications
            SET subject = $1, body = $2, status = $3, sent_at = $4,
                recipient_email = $5, recipient_phone = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&notification.subject)
        .bind(&notification.body)
        .bind(notification.status.to_string())
        .bind(notification.sent_at)
        .bind(&notification.recipient_email)
        .bind(&notification.recipient_phone)
        .bind(notification.id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(StoreError::NotFound(notification.id))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Notification, StoreError> {
        let notification: Option<Notification> =
            sqlx::query_as("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        notification.ok_or(StoreError::NotFound(id))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Notification>, StoreError> {
        let notifications: Vec<Notification> = sqlx::query_as(
            "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn find_by_kind(&self, kind: NotificationKind) -> Result<Vec<Notification>, StoreError> {
        let notifications: Vec<Notification> =
            sqlx::query_as("SELECT * FROM notifications WHERE kind = $1 ORDER BY created_at DESC")
                .bind(kind.to_string())
                .fetch_all(&self.pool)
                .await?;

        Ok(notifications)
    }

    async fn find_by_status(
        &self,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, StoreError> {
        let notifications: Vec<Notification> = sqlx::query_as(
            "SELECT * FROM notifications WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    async fn find_all(&self) -> Result<Vec<Notification>, StoreError> {
        let notifications: Vec<Notification> =
            sqlx::query_as("SELECT * FROM notifications ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(notifications)
    }
}
