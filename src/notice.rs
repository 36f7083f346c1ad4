//! Transient messages shown as toasts in the corner of the window.
use crate::util::time::{current_time_secs, elapsed};

/// Seconds a notice stays on screen
pub const NOTICE_SECS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub shown_at: f64,
}

#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push_at(level, message, current_time_secs());
    }

    pub fn push_at(&mut self, level: NoticeLevel, message: impl Into<String>, now: f64) {
        let message = message.into();
        match level {
            NoticeLevel::Error => log::warn!("{message}"),
            NoticeLevel::Info | NoticeLevel::Success => log::info!("{message}"),
        }
        self.items.push(Notice {
            message,
            level,
            shown_at: now,
        });
    }

    /// Drops every notice older than [`NOTICE_SECS`]
    pub fn prune(&mut self, now: f64) {
        self.items
            .retain(|notice| !elapsed(notice.shown_at, now, NOTICE_SECS));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_expire_after_three_seconds() {
        let mut notices = Notices::new();
        notices.push_at(NoticeLevel::Error, "first", 0.0);
        notices.push_at(NoticeLevel::Info, "second", 2.0);

        notices.prune(2.9);
        assert_eq!(notices.len(), 2);

        notices.prune(3.0);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.latest().map(|n| n.message.as_str()), Some("second"));

        notices.prune(5.0);
        assert!(notices.is_empty());
    }
}
