//! Transient notices (toasts) that dismiss themselves.

use std::time::{Duration, Instant};

pub const NOTICE_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Clone, Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>, now: Instant) {
        self.items.push(Notice {
            level,
            message: message.into(),
            expires_at: now + NOTICE_TTL,
        });
    }

    /// Drops expired notices, returning how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|notice| notice.expires_at > now);
        before - self.items.len()
    }

    pub fn dismiss(&mut self, index: usize) -> Option<Notice> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn active(&self) -> &[Notice] {
        &self.items
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.items.iter().map(|notice| notice.expires_at).min()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
