//! Sync configuration.

use crate::error::{SyncError, SyncResult};
use crate::staleness::StalenessWindow;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

/// Tunables for the syncers and the talent batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Freshness window for per-avatar detail data.
    pub detail_window: StalenessWindow,
    /// Freshness window for the account summary.
    pub summary_window: StalenessWindow,
    /// Default-level talent window when a confirmed snapshot is held.
    pub talent_confirmed_minutes: f64,
    /// Default-level talent window when no confirmed snapshot is held.
    pub talent_unconfirmed_minutes: f64,
    /// Elevated-level talent window.
    pub talent_elevated_minutes: f64,
    /// Maximum in-flight skill fetches.
    pub talent_concurrency: usize,
    /// The batch stops calling out once failures exceed this.
    pub failure_threshold: usize,
    /// A detail payload with more avatars than this is a full roster and
    /// evicts cached avatars it does not mention.
    pub full_roster_min: usize,
    /// A talent batch larger than this announces itself before starting.
    pub progress_notice_min: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            detail_window: StalenessWindow::new(60.0, 2.0, 0.0),
            summary_window: StalenessWindow::new(60.0, 2.0, 0.0),
            talent_confirmed_minutes: 48.0 * 60.0,
            talent_unconfirmed_minutes: 3.0 * 60.0,
            talent_elevated_minutes: 60.0,
            talent_concurrency: 5,
            failure_threshold: 5,
            full_roster_min: 8,
            progress_notice_min: 8,
        }
    }
}

impl SyncConfig {
    /// Talent freshness window for an avatar.
    #[must_use]
    pub fn talent_window(&self, confirmed: bool) -> StalenessWindow {
        let default = if confirmed {
            self.talent_confirmed_minutes
        } else {
            self.talent_unconfirmed_minutes
        };
        StalenessWindow::new(default, self.talent_elevated_minutes, 0.0)
    }

    /// Rejects values the talent batch cannot run with.
    pub fn validate(&self) -> SyncResult<()> {
        if self.talent_concurrency == 0 {
            return Err(SyncError::InvalidConfig(
                "talent_concurrency must be at least 1".to_string(),
            ));
        }
        if self.talent_concurrency > Semaphore::MAX_PERMITS {
            return Err(SyncError::InvalidConfig(format!(
                "talent_concurrency must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(())
    }
}
