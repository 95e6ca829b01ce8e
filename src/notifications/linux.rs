use anyhow::Result;
use notify_rust::{Notification, Timeout, Urgency};

use super::OsMessage;

/// freedesktop has no subtitle line, so it leads the body instead
pub fn send_notification(os: &OsMessage, sound: bool) -> Result<()> {
    let body = if os.subtitle.is_empty() {
        os.message.clone()
    } else {
        format!("{}\n{}", os.subtitle, os.message)
    };

    let mut notification = Notification::new();
    notification
        .summary(&os.title)
        .body(&body)
        .appname("estate-rise")
        .urgency(if os.urgent {
            Urgency::Critical
        } else {
            Urgency::Normal
        });

    if os.urgent {
        // Critical notifications stay until dismissed
        notification.timeout(Timeout::Never);
    }
    if sound {
        notification.sound_name(if os.urgent {
            "dialog-warning"
        } else {
            "message-new-instant"
        });
    }

    notification.show()?;
    Ok(())
}
