//! Sync stamps for staleness tracking.
//!
//! A stamp is the wall-clock time (milliseconds since the Unix epoch) at
//! which a category of data was last pulled from the remote service. Stamps
//! are kept apart from business fields so that nothing but a completed sync
//! can move them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Milliseconds since the Unix epoch at which a sync completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncStamp(i64);

impl SyncStamp {
    /// Creates a stamp at the current time.
    #[must_use]
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    /// Creates a stamp from raw epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw epoch milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// A zero or negative stamp carries no information and counts as "never synced".
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.0 <= 0
    }

    /// Returns a stamp shifted back by `ago`. Saturates rather than wrapping.
    #[must_use]
    pub fn minus(&self, ago: Duration) -> Self {
        let millis = i64::try_from(ago.as_millis()).unwrap_or(i64::MAX);
        Self(self.0.saturating_sub(millis))
    }

    /// Milliseconds elapsed from `self` until `now`. Negative when `self`
    /// lies in the future (clock skew).
    #[must_use]
    pub const fn elapsed_millis(&self, now: SyncStamp) -> i64 {
        now.0.saturating_sub(self.0)
    }

    /// Returns the later of two stamps.
    #[must_use]
    pub fn latest(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for SyncStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match chrono::DateTime::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0),
        }
    }
}
