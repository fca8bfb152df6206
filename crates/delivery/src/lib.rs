//! Outbound delivery channels.
//!
//! The pipeline talks to a [`DeliveryChannel`] trait object, so the
//! simulated transports in [`simulated`] can be swapped for real email/SMS
//! providers without touching the dispatcher.

pub mod simulated;

use async_trait::async_trait;
use thiserror::Error;

use herald_common::types::Notification;

pub use simulated::{SimulatedEmailChannel, SimulatedSmsChannel};

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("{channel} service unavailable")]
    Unavailable { channel: &'static str },
}

/// A transport capable of delivering a rendered notification.
///
/// Each call is independent: no shared state, no backoff, no retry.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// Channel name used in logs and telemetry.
    fn name(&self) -> &'static str;

    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError>;
}
