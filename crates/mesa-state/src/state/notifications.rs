//! Staff-facing notification banners. Append-only; staff dismiss them one by
//! one or all at once. Nothing expires on its own.

use mesa_core::{Notification, Severity};

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(
            id = %notification.id,
            severity = ?notification.severity,
            message = %notification.message,
            "Notification posted"
        );
        self.items.push(notification);
    }

    /// Dismisses one notification. Returns `false` if it was already gone.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Oldest first.
    pub fn list(&self) -> &[Notification] {
        &self.items
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn count_by(&self, severity: Severity) -> usize {
        self.items.iter().filter(|n| n.severity == severity).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
