//! Notification integration trait definition.

use anyhow::Result;
use async_trait::async_trait;

use super::NotificationEvent;

/// Trait for notification integrations.
///
/// Each integration (in-app toasts, desktop notifications) implements this
/// trait to receive and handle notification events.
#[async_trait]
pub trait NotificationIntegration: Send + Sync {
    /// Integration name (for logging and config identification)
    fn name(&self) -> &str;

    /// Whether this integration wants the given event
    fn handles_event(&self, event: &NotificationEvent) -> bool;

    fn is_enabled(&self) -> bool;

    /// Deliver one event. Errors are logged by the service and never
    /// stop delivery to the other integrations.
    async fn send(&self, event: &NotificationEvent) -> Result<()>;
}
