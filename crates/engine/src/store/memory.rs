//! In-memory store backend.
//!
//! Used when no `DATABASE_URL` is configured and by the pipeline tests.
//! Records live in a map behind an async lock; identifier assignment and
//! update are atomic with respect to concurrent dispatches.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use herald_common::types::{NewNotification, Notification, NotificationKind, NotificationStatus};

use super::{NotificationStore, StoreError};

#[derive(Default)]
pub struct InMemoryNotificationStore {
    records: RwLock<HashMap<Uuid, Notification>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect records matching `predicate`, newest first.
    async fn filtered(&self, predicate: impl Fn(&Notification) -> bool) -> Vec<Notification> {
        let records = self.records.read().await;
        let mut matched: Vec<Notification> =
            records.values().filter(|n| predicate(n)).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn create(&self, new: NewNotification) -> Result<Notification, StoreError> {
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            kind: new.kind,
            subject: new.subject,
            body: new.body,
            status: new.status,
            created_at: new.created_at,
            sent_at: None,
            recipient_email: new.recipient_email,
            recipient_phone: new.recipient_phone,
        };

        let mut records = self.records.write().await;
        records.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn update(&self, notification: &Notification) -> Result<Notification, StoreError> {
        let mut records = self.records.write().await;
        if !records.contains_key(&notification.id) {
            return Err(StoreError::NotFound(notification.id));
        }
        records.insert(notification.id, notification.clone());
        Ok(notification.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Notification, StoreError> {
        let records = self.records.read().await;
        records.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Notification>, StoreError> {
        Ok(self.filtered(|n| n.user_id == user_id).await)
    }

    async fn find_by_kind(&self, kind: NotificationKind) -> Result<Vec<Notification>, StoreError> {
        Ok(self.filtered(|n| n.kind == kind).await)
    }

    async fn find_by_status(
        &self,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, StoreError> {
        Ok(self.filtered(|n| n.status == status).await)
    }

    async fn find_all(&self) -> Result<Vec<Notification>, StoreError> {
        Ok(self.filtered(|_| true).await)
    }
}
