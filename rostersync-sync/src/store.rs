//! Persistence seam for player records.

use crate::error::SyncResult;
use async_trait::async_trait;
use rostersync_model::Player;

/// Saves a player record. Called once at the end of each top-level sync
/// operation, never per avatar.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn persist(&self, player: &Player) -> SyncResult<()>;
}
