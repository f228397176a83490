//! # Reveal Schedule
//!
//! Tokens show placeholder artwork until a fixed reveal instant. The instant
//! is the only process-wide constant in the renderer; it is injected as a
//! value and read-only after construction, and "now" is always an explicit
//! argument so tests control time deterministically.

use chrono::{DateTime, Utc};

/// Default reveal instant: 2026-01-01 00:00:00 JST.
pub const REVEAL_TIMESTAMP: i64 = 1_767_193_200;

/// The process-wide reveal instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    reveal_at: DateTime<Utc>,
}

impl Default for RevealSchedule {
    fn default() -> Self {
        // The constant is a known-valid Unix timestamp.
        RevealSchedule::from_timestamp(REVEAL_TIMESTAMP).expect("valid reveal timestamp")
    }
}

impl RevealSchedule {
    pub fn new(reveal_at: DateTime<Utc>) -> RevealSchedule {
        RevealSchedule { reveal_at }
    }

    /// Build from a Unix timestamp in seconds. Returns `None` for values
    /// outside the representable date range.
    pub fn from_timestamp(secs: i64) -> Option<RevealSchedule> {
        DateTime::from_timestamp(secs, 0).map(RevealSchedule::new)
    }

    pub fn reveal_at(&self) -> DateTime<Utc> {
        self.reveal_at
    }

    /// Whether tokens are revealed at the given instant.
    pub fn is_revealed(&self, now: DateTime<Utc>) -> bool {
        now >= self.reveal_at
    }
}
