//! Staleness gate deciding whether a category of cached data is refetched.

use rostersync_types::SyncStamp;
use serde::{Deserialize, Serialize};

/// Threshold used when a window has no entry for the requested level.
pub const FALLBACK_MINUTES: f64 = 60.0;

/// Caller hint controlling how aggressively cached data is bypassed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ForceLevel {
    #[default]
    Default = 0,
    Elevated = 1,
    /// Always refetch.
    Full = 2,
}

/// A bare `true` means "use the default window", the same as `false`.
impl From<bool> for ForceLevel {
    fn from(_: bool) -> Self {
        Self::Default
    }
}

impl TryFrom<u8> for ForceLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Default),
            1 => Ok(Self::Elevated),
            2 => Ok(Self::Full),
            other => Err(format!("force level out of range: {other}")),
        }
    }
}

impl From<ForceLevel> for u8 {
    fn from(level: ForceLevel) -> Self {
        level as u8
    }
}

/// Per-force-level freshness thresholds in minutes.
///
/// A level without an entry, or with a NaN entry, falls back to
/// [`FALLBACK_MINUTES`]. A threshold
/// of zero means the data is always stale at that level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StalenessWindow {
    #[serde(default)]
    pub default: Option<f64>,
    #[serde(default)]
    pub elevated: Option<f64>,
    #[serde(default)]
    pub full: Option<f64>,
}

impl StalenessWindow {
    /// Creates a window with a threshold for every level.
    #[must_use]
    pub const fn new(default: f64, elevated: f64, full: f64) -> Self {
        Self {
            default: Some(default),
            elevated: Some(elevated),
            full: Some(full),
        }
    }

    /// Threshold in minutes for `level`.
    #[must_use]
    pub fn minutes_for(&self, level: ForceLevel) -> f64 {
        let entry = match level {
            ForceLevel::Default => self.default,
            ForceLevel::Elevated => self.elevated,
            ForceLevel::Full => self.full,
        };
        entry.filter(|minutes| !minutes.is_nan()).unwrap_or(FALLBACK_MINUTES)
    }
}

/// Returns true when data last synced at `last` must be refetched now.
pub fn need_refresh(last: Option<SyncStamp>, force: ForceLevel, window: &StalenessWindow) -> bool {
    need_refresh_at(last, force, window, SyncStamp::now())
}

/// [`need_refresh`] against an explicit clock reading.
pub fn need_refresh_at(
    last: Option<SyncStamp>,
    force: ForceLevel,
    window: &StalenessWindow,
    now: SyncStamp,
) -> bool {
    let Some(last) = last.filter(|stamp| !stamp.is_unset()) else {
        return true;
    };
    if force == ForceLevel::Full {
        return true;
    }

    // A stamp in the future means clock skew or corruption.
    let elapsed_ms = last.elapsed_millis(now);
    if elapsed_ms < 0 {
        return true;
    }

    let threshold = window.minutes_for(force);
    if threshold <= 0.0 {
        return true;
    }
    elapsed_ms as f64 / 60_000.0 > threshold
}
