use anyhow::Result;
use mac_notification_sys::Notification;

use super::OsMessage;

pub fn send_notification(os: &OsMessage, sound: bool) -> Result<()> {
    let mut notification = Notification::new();
    notification
        .title(&os.title)
        .subtitle(&os.subtitle)
        .message(&os.message);

    if sound {
        notification.sound(if os.urgent { "Basso" } else { "default" });
    }

    if let Err(e) = notification.send() {
        tracing::warn!(error = ?e, urgent = os.urgent, "Desktop notification not shown");
    }
    Ok(())
}
