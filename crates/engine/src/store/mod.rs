//! Durable notification records.
//!
//! The dispatcher talks to the [`NotificationStore`] trait; the Postgres
//! backend is used when a database is configured, the in-memory backend
//! otherwise (and in tests).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use herald_common::error::AppError;
use herald_common::types::{NewNotification, Notification, NotificationKind, NotificationStatus};

pub use memory::InMemoryNotificationStore;
pub use postgres::PgNotificationStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("notification {0} not found")]
    NotFound(Uuid),

    #[error("store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("Notification {id} not found")),
            StoreError::Backend(err) => AppError::Internal(err.to_string()),
        }
    }
}

/// Persistence contract for notification records.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a new record, assigning its identifier.
    async fn create(&self, new: NewNotification) -> Result<Notification, StoreError>;

    /// Full-record replace keyed by identifier. Fails with `NotFound` if no
    /// record with that identifier exists.
    async fn update(&self, notification: &Notification) -> Result<Notification, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Notification, StoreError>;

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<Notification>, StoreError>;

    async fn find_by_kind(&self, kind: NotificationKind) -> Result<Vec<Notification>, StoreError>;

    async fn find_by_status(
        &self,
        status: NotificationStatus,
    ) -> Result<Vec<Notification>, StoreError>;

    async fn find_all(&self) -> Result<Vec<Notification>, StoreError>;
}
