//! Dismissible, self-expiring notices.

use chrono::{DateTime, Duration, Utc};

/// Default time a notice stays up.
pub const DEFAULT_LIFETIME_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    /// How long the notice stays up before dismissing itself.
    pub lifetime: Duration,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message.into())
    }

    fn new(kind: NoticeKind, message: String) -> Self {
        Self {
            kind,
            message,
            raised_at: Utc::now(),
            lifetime: Duration::seconds(DEFAULT_LIFETIME_SECS),
        }
    }

    /// Override the lifetime (from `[notices] auto_dismiss_secs`).
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.raised_at + self.lifetime
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

/// The stack of notices currently on screen.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    next_id: u64,
    entries: Vec<(u64, Notice)>,
}

impl NoticeBoard {
    /// Add a notice; returns the handle used to dismiss it.
    ///
    /// Notices that have already run out are dropped first.
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.prune(Utc::now());
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, notice));
        id
    }

    /// Dismiss a notice by hand. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(i, _)| *i != id);
        self.entries.len() != before
    }

    /// Drop every notice whose lifetime has run out.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|(_, n)| !n.is_expired(now));
    }

    /// Notices still on screen at `now`.
    pub fn active_at(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Notice> {
        self.entries
            .iter()
            .map(|(_, n)| n)
            .filter(move |n| !n.is_expired(now))
    }

    pub fn active(&self) -> impl Iterator<Item = &Notice> {
        self.active_at(Utc::now())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent notice still on screen, if any.
    pub fn last(&self) -> Option<&Notice> {
        self.active().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expires_after_five_seconds() {
        let notice = Notice::success("Uploaded");
        let raised = notice.raised_at;
        assert!(!notice.is_expired(raised + Duration::milliseconds(4_999)));
        assert!(notice.is_expired(raised + Duration::seconds(5)));
    }

    #[test]
    fn test_board_prune_and_dismiss() {
        let mut board = NoticeBoard::default();
        let short = board.push(Notice::error("boom").with_lifetime(Duration::seconds(1)));
        let long = board.push(Notice::success("ok").with_lifetime(Duration::seconds(60)));
        assert_eq!(board.len(), 2);

        board.prune(Utc::now() + Duration::seconds(2));
        assert_eq!(board.len(), 1);
        assert!(!board.dismiss(short));
        assert!(board.dismiss(long));
        assert!(board.is_empty());
    }

    #[test]
    fn test_expired_notices_leave_the_board() {
        let mut board = NoticeBoard::default();
        board.push(Notice::success("Uploaded").with_lifetime(Duration::zero()));
        assert_eq!(board.active().count(), 0);
        assert!(board.last().is_none());

        board.push(Notice::error("Remove failed"));
        assert_eq!(board.len(), 1);
        assert_eq!(board.last().unwrap().message, "Remove failed");

        let later = Utc::now() + Duration::seconds(DEFAULT_LIFETIME_SECS);
        assert_eq!(board.active_at(later).count(), 0);
    }
}
