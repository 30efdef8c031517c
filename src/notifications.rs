use std::time::{Duration, Instant};

/// How long a banner stays up before it dismisses itself
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A dismissible banner shown at the top of the content area
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    created: Instant,
}

impl Notification {
    fn new(kind: NotificationKind, message: String) -> Self {
        Self {
            kind,
            message,
            created: Instant::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
}

/// Holds active banners and expires them after their time-to-live.
/// `sweep` runs from the event loop; there is no timer thread.
#[derive(Debug)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            notifications: Vec::new(),
            ttl: Duration::from_millis(ttl_ms),
        }
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification::new(kind, message.into()));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message);
    }

    /// Drop banners older than the time-to-live
    pub fn sweep(&mut self) {
        let ttl = self.ttl;
        self.notifications.retain(|n| n.age() < ttl);
    }

    /// Dismiss a banner by position (newest last)
    pub fn dismiss(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }

    pub fn dismiss_all(&mut self) {
        self.notifications.clear();
    }

    pub fn active(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_sweep_expires_old_banners() {
        let mut center = NotificationCenter::new(20);
        center.success("Exported 3 rows");
        assert_eq!(center.active().len(), 1);

        sleep(Duration::from_millis(30));
        center.sweep();
        assert!(center.is_empty());
    }

    #[test]
    fn test_dismiss_by_index() {
        let mut center = NotificationCenter::new(60_000);
        center.info("first");
        center.warning("second");
        center.dismiss(0);
        assert_eq!(center.active().len(), 1);
        assert_eq!(center.active()[0].message, "second");
        center.dismiss(5); // out of range is a no-op
        assert_eq!(center.active().len(), 1);
    }
}
