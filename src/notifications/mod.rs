//! Notification system for user-visible outcomes.
//!
//! Flows emit a `NotificationEvent`; the `NotificationService` hands it to
//! every integration that wants it. The in-app toast queue always receives
//! events, desktop notifications are opt-in.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "linux")]
pub mod linux;

mod integration;
mod os_integration;
mod service;
mod toast;

pub use integration::NotificationIntegration;
pub use os_integration::OsIntegration;
pub use service::NotificationService;
pub use toast::{Toast, ToastIntegration, ToastQueue, ToastVariant};

/// Desktop rendering of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsMessage {
    pub title: String,
    pub subtitle: String,
    pub message: String,
    /// Failures ask the desktop for more attention
    pub urgent: bool,
}

/// Show `message` through the platform notifier. Blocks until the
/// notification daemon answers; OsIntegration calls it off the UI task.
pub fn send_os_notification(message: &OsMessage, sound: bool) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        macos::send_notification(message, sound)
    }

    #[cfg(target_os = "linux")]
    {
        linux::send_notification(message, sound)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        let _ = sound;
        tracing::info!(
            title = %message.title,
            subtitle = %message.subtitle,
            urgent = message.urgent,
            "{}",
            message.message
        );
        Ok(())
    }
}

/// All notification events that can be dispatched to integrations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data")]
pub enum NotificationEvent {
    /// KYC application accepted for review
    #[serde(rename = "kyc.submitted")]
    KycSubmitted { reference: Uuid },

    /// KYC submission port reported a failure
    #[serde(rename = "kyc.failed")]
    KycFailed { error: String },

    /// Registration password and confirmation differ
    #[serde(rename = "registration.password_mismatch")]
    PasswordMismatch,

    /// Registration attempted without accepting the terms
    #[serde(rename = "registration.terms_required")]
    TermsRequired,

    /// Registration handed to the account service
    #[serde(rename = "registration.submitted")]
    RegistrationSubmitted { email: String, reference: Uuid },

    /// Registration port reported a failure
    #[serde(rename = "registration.failed")]
    RegistrationFailed { error: String },
}

/// Title, description and presentation of a toast for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastContent {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    /// `None` uses the configured default duration
    pub duration: Option<Duration>,
}

impl NotificationEvent {
    /// Get the event type string for filtering (e.g., "kyc.submitted")
    pub fn event_type(&self) -> &'static str {
        match self {
            NotificationEvent::KycSubmitted { .. } => "kyc.submitted",
            NotificationEvent::KycFailed { .. } => "kyc.failed",
            NotificationEvent::PasswordMismatch => "registration.password_mismatch",
            NotificationEvent::TermsRequired => "registration.terms_required",
            NotificationEvent::RegistrationSubmitted { .. } => "registration.submitted",
            NotificationEvent::RegistrationFailed { .. } => "registration.failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        self.to_toast().variant == ToastVariant::Destructive
    }

    /// In-app toast presentation of this event
    pub fn to_toast(&self) -> ToastContent {
        let long = Some(Duration::from_millis(5000));
        match self {
            NotificationEvent::KycSubmitted { .. } => ToastContent {
                title: "KYC Submission Successful".into(),
                description: "Your KYC information has been submitted for review. We'll notify you once the verification is complete.".into(),
                variant: ToastVariant::Default,
                duration: long,
            },
            NotificationEvent::KycFailed { error } => ToastContent {
                title: "KYC Submission Failed".into(),
                description: format!("We could not submit your KYC information: {error}. Please try again."),
                variant: ToastVariant::Destructive,
                duration: None,
            },
            NotificationEvent::PasswordMismatch => ToastContent {
                title: "Passwords don't match".into(),
                description: "Please make sure your passwords match.".into(),
                variant: ToastVariant::Destructive,
                duration: None,
            },
            NotificationEvent::TermsRequired => ToastContent {
                title: "Terms & Conditions Required".into(),
                description: "Please accept the terms and conditions to continue.".into(),
                variant: ToastVariant::Destructive,
                duration: None,
            },
            NotificationEvent::RegistrationSubmitted { .. } => ToastContent {
                title: "Registration not implemented yet".into(),
                description: "This is just a UI demonstration. Integration with authentication will be implemented in future phases.".into(),
                variant: ToastVariant::Default,
                duration: long,
            },
            NotificationEvent::RegistrationFailed { error } => ToastContent {
                title: "Registration Failed".into(),
                description: format!("We could not create your account: {error}."),
                variant: ToastVariant::Destructive,
                duration: None,
            },
        }
    }

    /// Desktop notification text: the toast text plus a subtitle naming
    /// the flow or the account
    pub fn to_os_notification(&self) -> OsMessage {
        let subtitle = match self {
            NotificationEvent::KycSubmitted { reference } => format!("Reference {reference}"),
            NotificationEvent::RegistrationSubmitted { email, .. } => email.clone(),
            NotificationEvent::KycFailed { .. } => "KYC".to_string(),
            _ => "Registration".to_string(),
        };
        let toast = self.to_toast();
        OsMessage {
            urgent: toast.variant == ToastVariant::Destructive,
            title: toast.title,
            subtitle,
            message: toast.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_tag() {
        let event = NotificationEvent::KycFailed {
            error: "timeout".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "kyc.failed");
        assert_eq!(json["data"]["error"], "timeout");

        let back: NotificationEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_unit_event_serializes_without_data() {
        let json = serde_json::to_value(&NotificationEvent::TermsRequired).unwrap();
        assert_eq!(json["event"], "registration.terms_required");
    }

    #[test]
    fn test_event_type_matches_serde_tag() {
        let events = vec![
            NotificationEvent::KycSubmitted {
                reference: Uuid::nil(),
            },
            NotificationEvent::KycFailed { error: "x".into() },
            NotificationEvent::PasswordMismatch,
            NotificationEvent::TermsRequired,
            NotificationEvent::RegistrationSubmitted {
                email: "a@b.ma".into(),
                reference: Uuid::nil(),
            },
            NotificationEvent::RegistrationFailed { error: "x".into() },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["event"], event.event_type());
        }
    }

    #[test]
    fn test_validation_toasts_are_destructive() {
        assert!(NotificationEvent::PasswordMismatch.is_failure());
        assert!(NotificationEvent::TermsRequired.is_failure());
        assert!(!NotificationEvent::KycSubmitted {
            reference: Uuid::nil()
        }
        .is_failure());
    }

    #[test]
    fn test_success_toasts_stay_five_seconds() {
        let toast = NotificationEvent::KycSubmitted {
            reference: Uuid::nil(),
        }
        .to_toast();
        assert_eq!(toast.title, "KYC Submission Successful");
        assert_eq!(toast.duration, Some(Duration::from_millis(5000)));

        let toast = NotificationEvent::PasswordMismatch.to_toast();
        assert_eq!(toast.title, "Passwords don't match");
        assert_eq!(toast.duration, None);
    }

    #[test]
    fn test_os_notification_reuses_toast_text() {
        let os = NotificationEvent::RegistrationSubmitted {
            email: "amina@example.ma".into(),
            reference: Uuid::nil(),
        }
        .to_os_notification();
        assert_eq!(os.title, "Registration not implemented yet");
        assert_eq!(os.subtitle, "amina@example.ma");
        assert!(os.message.starts_with("This is just a UI demonstration"));
        assert!(!os.urgent);
    }

    #[test]
    fn test_failures_are_urgent_on_the_desktop() {
        let os = NotificationEvent::KycFailed {
            error: "accounts is unavailable".into(),
        }
        .to_os_notification();
        assert_eq!(os.subtitle, "KYC");
        assert!(os.urgent);
    }
}
