//! Simulated email and SMS transports.
//!
//! Each call blocks for a fixed latency, then fails with a configured
//! probability drawn from a uniform random source. Latency and failure
//! rate are configuration of these implementations only — the
//! [`DeliveryChannel`] contract says nothing about either.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use herald_common::config::AppConfig;
use herald_common::types::Notification;
use herald_telemetry::TelemetryClient;

use crate::{DeliveryChannel, DeliveryError};

/// Simulated email transport (default: 500 ms, 5% failure).
pub struct SimulatedEmailChannel {
    latency: Duration,
    failure_rate: f64,
    telemetry: Arc<TelemetryClient>,
}

impl SimulatedEmailChannel {
    pub fn new(latency: Duration, failure_rate: f64, telemetry: Arc<TelemetryClient>) -> Self {
        Self {
            latency,
            failure_rate,
            telemetry,
        }
    }

    pub fn from_config(config: &AppConfig, telemetry: Arc<TelemetryClient>) -> Self {
        Self::new(
            Duration::from_millis(config.email_latency_ms),
            config.email_failure_rate,
            telemetry,
        )
    }
}

#[async_trait]
impl DeliveryChannel for SimulatedEmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        tokio::time::sleep(self.latency).await;

        if rand::random::<f64>() < self.failure_rate {
            return Err(DeliveryError::Unavailable { channel: "email" });
        }

        tracing::info!(
            notification_id = %notification.id,
            user_id = notification.user_id,
            kind = %notification.kind,
            subject = %notification.subject,
            recipient = notification.recipient_email.as_deref().unwrap_or("unknown"),
            "Email sent"
        );
        self.telemetry.log_event(
            &format!("Email delivered for notification {}", notification.id),
            "INFO",
        );

        Ok(())
    }
}

/// Simulated SMS transport (default: 300 ms, 3% failure).
pub struct SimulatedSmsChannel {
    latency: Duration,
    failure_rate: f64,
    telemetry: Arc<TelemetryClient>,
}

impl SimulatedSmsChannel {
    pub fn new(latency: Duration, failure_rate: f64, telemetry: Arc<TelemetryClient>) -> Self {
        Self {
            latency,
            failure_rate,
            telemetry,
        }
    }

    pub fn from_config(config: &AppConfig, telemetry: Arc<TelemetryClient>) -> Self {
        Self::new(
            Duration::from_millis(config.sms_latency_ms),
            config.sms_failure_rate,
            telemetry,
        )
    }
}

#[async_trait]
impl DeliveryChannel for SimulatedSmsChannel {
    fn name(&self) -> &'static str {
        "sms"
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), DeliveryError> {
        tokio::time::sleep(self.latency).await;

        if rand::random::<f64>() < self.failure_rate {
            return Err(DeliveryError::Unavailable { channel: "sms" });
        }

        tracing::info!(
            notification_id = %notification.id,
            user_id = notification.user_id,
            recipient = notification.recipient_phone.as_deref().unwrap_or("unknown"),
            "SMS sent"
        );
        self.telemetry.log_event(
            &format!("SMS delivered for notification {}", notification.id),
            "INFO",
        );

        Ok(())
    }
}
