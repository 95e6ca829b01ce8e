//! OS-native notification integration (macOS/Linux).

use anyhow::Result;
use async_trait::async_trait;

use super::integration::NotificationIntegration;
use super::NotificationEvent;
use crate::config::OsNotificationConfig;

/// OS-native notification integration.
///
/// Sends notifications using the platform's native notification system:
/// - macOS: Uses `mac-notification-sys`
/// - Linux: Uses `notify-rust` (freedesktop notifications)
pub struct OsIntegration {
    enabled: bool,
    sound: bool,
    subscribed_events: Vec<String>,
}

impl OsIntegration {
    pub fn new(config: &OsNotificationConfig) -> Self {
        Self {
            enabled: config.enabled,
            sound: config.sound,
            subscribed_events: config.events.clone(),
        }
    }
}

#[async_trait]
impl NotificationIntegration for OsIntegration {
    fn name(&self) -> &str {
        "os"
    }

    fn handles_event(&self, event: &NotificationEvent) -> bool {
        // Empty subscription list means handle all events
        self.subscribed_events.is_empty()
            || self
                .subscribed_events
                .iter()
                .any(|e| e == event.event_type())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn send(&self, event: &NotificationEvent) -> Result<()> {
        let os_message = event.to_os_notification();
        let sound = self.sound;
        let event_type = event.event_type();

        // Desktop notification APIs block on the session bus; keep them off
        // the UI task and do not wait for delivery.
        tokio::task::spawn_blocking(move || {
            if let Err(e) = super::send_os_notification(&os_message, sound) {
                tracing::warn!(
                    integration = "os",
                    event = %event_type,
                    error = %e,
                    "Failed to send OS notification"
                );
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(enabled: bool, events: Vec<String>) -> OsNotificationConfig {
        OsNotificationConfig {
            enabled,
            sound: false,
            events,
        }
    }

    #[test]
    fn test_os_integration_from_config() {
        let integration = OsIntegration::new(&make_test_config(true, vec![]));
        assert!(integration.is_enabled());
        assert_eq!(integration.name(), "os");
    }

    #[test]
    fn test_os_integration_off_by_default() {
        let integration = OsIntegration::new(&OsNotificationConfig::default());
        assert!(!integration.is_enabled());
    }

    #[test]
    fn test_handles_event_specific_filter() {
        let integration = OsIntegration::new(&make_test_config(
            true,
            vec!["kyc.submitted".into(), "kyc.failed".into()],
        ));

        assert!(integration.handles_event(&NotificationEvent::KycFailed {
            error: "x".into()
        }));
        assert!(!integration.handles_event(&NotificationEvent::PasswordMismatch));
    }
}
