//! In-app toast queue and the integration that feeds it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::integration::NotificationIntegration;
use super::NotificationEvent;

/// Most toasts kept at once; older ones are dropped first
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn from_event(event: &NotificationEvent, default_duration: Duration) -> Self {
        let content = event.to_toast();
        Self {
            id: Uuid::new_v4(),
            title: content.title,
            description: content.description,
            variant: content.variant,
            created_at: Instant::now(),
            duration: content.duration.unwrap_or(default_duration),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}

/// Shared between the notification service (writer) and the render loop
/// (reader).
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    inner: Arc<Mutex<VecDeque<Toast>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, toast: Toast) {
        let mut toasts = self.lock();
        if toasts.len() == MAX_TOASTS {
            toasts.pop_front();
        }
        toasts.push_back(toast);
    }

    /// Drop expired toasts and return the rest, oldest first
    pub fn active(&self, now: Instant) -> Vec<Toast> {
        let mut toasts = self.lock();
        toasts.retain(|t| !t.is_expired(now));
        toasts.iter().cloned().collect()
    }

    pub fn dismiss(&self, id: Uuid) {
        self.lock().retain(|t| t.id != id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Current toasts without pruning
    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().iter().cloned().collect()
    }
}

/// Pushes every event onto the in-app toast queue
pub struct ToastIntegration {
    queue: ToastQueue,
    default_duration: Duration,
}

impl ToastIntegration {
    pub fn new(queue: ToastQueue, default_duration: Duration) -> Self {
        Self {
            queue,
            default_duration,
        }
    }
}

#[async_trait]
impl NotificationIntegration for ToastIntegration {
    fn name(&self) -> &str {
        "toast"
    }

    fn handles_event(&self, _event: &NotificationEvent) -> bool {
        true
    }

    fn is_enabled(&self) -> bool {
        true
    }

    async fn send(&self, event: &NotificationEvent) -> Result<()> {
        self.queue
            .push(Toast::from_event(event, self.default_duration));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(title: &str, duration: Duration) -> Toast {
        Toast {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            variant: ToastVariant::Default,
            created_at: Instant::now(),
            duration,
        }
    }

    #[test]
    fn test_queue_drops_oldest_beyond_capacity() {
        let queue = ToastQueue::new();
        for i in 0..5 {
            queue.push(toast(&format!("t{i}"), Duration::from_secs(60)));
        }
        let titles: Vec<String> = queue.snapshot().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["t2", "t3", "t4"]);
    }

    #[test]
    fn test_active_prunes_expired() {
        let queue = ToastQueue::new();
        let short = toast("short", Duration::from_millis(10));
        let created = short.created_at;
        queue.push(short);
        queue.push(toast("long", Duration::from_secs(60)));

        let active = queue.active(created + Duration::from_millis(20));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "long");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clones_share_one_queue() {
        let queue = ToastQueue::new();
        let reader = queue.clone();
        let t = toast("shared", Duration::from_secs(1));
        let id = t.id;
        queue.push(t);
        assert_eq!(reader.len(), 1);
        reader.dismiss(id);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_integration_uses_default_duration_when_unset() {
        let queue = ToastQueue::new();
        let integration = ToastIntegration::new(queue.clone(), Duration::from_millis(1234));

        integration
            .send(&NotificationEvent::TermsRequired)
            .await
            .unwrap();

        let toasts = queue.snapshot();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Terms & Conditions Required");
        assert_eq!(toasts[0].variant, ToastVariant::Destructive);
        assert_eq!(toasts[0].duration, Duration::from_millis(1234));
    }
}
