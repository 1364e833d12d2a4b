//! Transient user notifications.
//!
//! Every mutating operation posts exactly one notice; the shell shows it
//! and drops it after a severity-dependent interval. Time is passed in
//! by the caller so expiry is deterministic under test.

use std::time::{Duration, Instant};

/// How loudly a notice is displayed, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    /// Errors linger a little longer than confirmations.
    pub fn display_duration(self) -> Duration {
        match self {
            Severity::Success => Duration::from_secs(4),
            Severity::Error => Duration::from_secs(6),
        }
    }
}

/// A single message with its severity and posting time.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    posted_at: Instant,
}

impl Notice {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.posted_at) >= self.severity.display_duration()
    }
}

/// Holds the currently visible notices, oldest first.
#[derive(Debug, Default)]
pub struct NoticeCenter {
    notices: Vec<Notice>,
}

impl NoticeCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, Severity::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) {
        self.push(message, Severity::Error, now);
    }

    fn push(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.notices.push(Notice {
            message: message.into(),
            severity,
            posted_at: now,
        });
    }

    /// Drop expired notices and return the ones still visible.
    pub fn active(&mut self, now: Instant) -> &[Notice] {
        self.notices.retain(|n| !n.is_expired(now));
        &self.notices
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
