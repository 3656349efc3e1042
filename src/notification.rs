//! User-facing notifications.
//!
//! Remote errors never escape the sequencer; they turn into one of these.
//! The queue outlives the wizard so a warning raised on completion is still
//! on screen after navigating to the schools list.

use crate::types::NotificationLevel;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}

/// FIFO of pending notifications; the front one is displayed.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notification: Notification) {
        self.pending.push_back(notification);
    }

    pub fn extend(&mut self, notifications: impl IntoIterator<Item = Notification>) {
        self.pending.extend(notifications);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.pending.front()
    }

    /// Drop the displayed notification and return it.
    pub fn dismiss(&mut self) -> Option<Notification> {
        self.pending.pop_front()
    }

    /// Drop leading notifications that do not need acknowledgement.
    ///
    /// Called when the user keeps working so success toasts don't pile up.
    pub fn expire_transient(&mut self) {
        while self
            .pending
            .front()
            .is_some_and(|n| !n.level.requires_dismissal())
        {
            self.pending.pop_front();
        }
    }

    /// True when the front notification must be dismissed before input
    /// reaches the screen underneath.
    pub fn is_blocking(&self) -> bool {
        self.current().is_some_and(|n| n.level.requires_dismissal())
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_dismiss() {
        let mut queue = NotificationQueue::default();
        queue.push(Notification::error("first"));
        queue.push(Notification::warning("second"));
        assert_eq!(queue.current().map(|n| n.message.as_str()), Some("first"));
        assert!(queue.is_blocking());
        queue.dismiss();
        assert_eq!(queue.current().map(|n| n.level), Some(NotificationLevel::Warning));
        queue.dismiss();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_expire_transient_stops_at_warning() {
        let mut queue = NotificationQueue::default();
        queue.push(Notification::success("created"));
        queue.push(Notification::info("loading"));
        queue.push(Notification::warning("admin failed"));
        queue.push(Notification::success("later"));
        queue.expire_transient();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().map(|n| n.level), Some(NotificationLevel::Warning));
    }
}
