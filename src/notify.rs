//! Stacking notification banners with a fixed auto-dismiss delay.

use std::fmt;
use std::time::{Duration, Instant};

pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Danger => "danger",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
    pub shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct NotificationArea {
    next_id: u64,
    notifications: Vec<Notification>,
}

impl NotificationArea {
    pub fn new() -> NotificationArea {
        NotificationArea::default()
    }

    /// Appends a notification and returns its id for later dismissal.
    pub fn show(&mut self, level: Level, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notifications.push(Notification {
            id,
            level,
            message: message.into(),
            shown_at: now,
        });
        id
    }

    /// Returns false if the notification was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    /// Drops every notification that has been visible for the full delay.
    pub fn expire(&mut self, now: Instant) {
        self.notifications
            .retain(|n| now.saturating_duration_since(n.shown_at) < AUTO_DISMISS_AFTER);
    }

    pub fn visible(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_stack_without_dedup() {
        let now = Instant::now();
        let mut area = NotificationArea::new();
        area.show(Level::Danger, "Failed to upload resume. Please try again.", now);
        area.show(Level::Danger, "Failed to upload resume. Please try again.", now);
        assert_eq!(area.visible().len(), 2);
        assert_ne!(area.visible()[0].id, area.visible()[1].id);
    }

    #[test]
    fn expires_after_five_seconds() {
        let start = Instant::now();
        let mut area = NotificationArea::new();
        area.show(Level::Success, "Resume uploaded and analyzed successfully!", start);

        area.expire(start + Duration::from_millis(4_999));
        assert_eq!(area.visible().len(), 1);

        area.expire(start + AUTO_DISMISS_AFTER);
        assert!(area.is_empty());
    }

    #[test]
    fn dismissed_notification_is_gone_immediately() {
        let start = Instant::now();
        let mut area = NotificationArea::new();
        let first = area.show(Level::Success, "first", start);
        area.show(Level::Danger, "second", start);

        assert!(area.dismiss(first));
        assert_eq!(area.visible().len(), 1);
        assert_eq!(area.visible()[0].message, "second");

        // a later auto-dismiss of the same id is a no-op
        assert!(!area.dismiss(first));
    }

    #[test]
    fn expiry_is_per_notification() {
        let start = Instant::now();
        let mut area = NotificationArea::new();
        area.show(Level::Info, "older", start);
        area.show(Level::Warning, "newer", start + Duration::from_secs(3));

        area.expire(start + Duration::from_secs(6));
        assert_eq!(area.visible().len(), 1);
        assert_eq!(area.visible()[0].level, Level::Warning);
    }
}
