//! Central notification service that dispatches events to all integrations.

use std::sync::Arc;

use super::integration::NotificationIntegration;
use super::os_integration::OsIntegration;
use super::toast::{ToastIntegration, ToastQueue};
use super::NotificationEvent;
use crate::config::Config;

/// Central notification dispatcher.
///
/// The toast integration always receives events. Other integrations are
/// skipped when notifications are disabled in the config.
pub struct NotificationService {
    toasts: ToastIntegration,
    integrations: Vec<Arc<dyn NotificationIntegration>>,
    enabled: bool,
}

impl NotificationService {
    pub fn from_config(config: &Config, queue: ToastQueue) -> Self {
        let mut integrations: Vec<Arc<dyn NotificationIntegration>> = Vec::new();
        integrations.push(Arc::new(OsIntegration::new(&config.notifications.os)));

        Self {
            toasts: ToastIntegration::new(queue, config.toast_duration()),
            integrations,
            enabled: config.notifications.enabled,
        }
    }

    /// Service that only feeds the toast queue
    pub fn toasts_only(queue: ToastQueue) -> Self {
        Self::from_config(
            &Config {
                notifications: crate::config::NotificationsConfig {
                    enabled: false,
                    os: Default::default(),
                },
                ..Config::default()
            },
            queue,
        )
    }

    /// Register an additional integration
    pub fn with_integration(mut self, integration: Arc<dyn NotificationIntegration>) -> Self {
        self.integrations.push(integration);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Integrations besides the toast queue
    pub fn integration_count(&self) -> usize {
        self.integrations.len()
    }

    /// Dispatch an event. Delivery errors are logged, never returned.
    pub async fn notify(&self, event: NotificationEvent) {
        tracing::info!(event = %event.event_type(), "Notification");

        if let Err(e) = self.toasts.send(&event).await {
            tracing::warn!(integration = "toast", error = %e, "Notification delivery failed");
        }

        if !self.enabled {
            return;
        }

        for integration in &self.integrations {
            if integration.is_enabled() && integration.handles_event(&event) {
                if let Err(e) = integration.send(&event).await {
                    tracing::warn!(
                        integration = %integration.name(),
                        event = %event.event_type(),
                        error = %e,
                        "Notification delivery failed"
                    );
                }
            }
        }
    }
}
