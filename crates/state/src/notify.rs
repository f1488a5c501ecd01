//! In-process notice feed built on a Tokio broadcast channel.
//!
//! Stores publish [`Notice`]s as side effects of mutations; any number of
//! consumers (a toast rail, a terminal printer, a test) subscribe and
//! render them. Publishing never blocks and never fails: with no
//! subscribers the notice is simply dropped.

use scholarbase_core::Timestamp;
use serde::Serialize;
use tokio::sync::broadcast;

/// Default capacity of the broadcast channel. Slow consumers that fall
/// more than this many notices behind start seeing `Lagged` errors.
const DEFAULT_CAPACITY: usize = 256;

/// Severity of a notice, mirroring the toast styles of the web portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A single user-facing notification.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: Timestamp,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Cloneable handle for publishing and subscribing to notices.
///
/// Clones share the same underlying channel, so a notice published
/// through any clone reaches every subscriber.
#[derive(Debug, Clone)]
pub struct NoticeBus {
    sender: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notice to all current subscribers.
    ///
    /// A `SendError` only means there are zero receivers, so it is ignored.
    pub fn publish(&self, notice: Notice) {
        let _ = self.sender.send(notice);
    }

    /// Subscribe to notices published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
