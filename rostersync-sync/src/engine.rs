//! Facade over the three syncers sharing one context.

use crate::context::SyncContext;
use crate::detail::DetailSyncer;
use crate::error::SyncResult;
use crate::staleness::ForceLevel;
use crate::summary::SummarySyncer;
use crate::talent::{AvatarSelection, TalentRefreshCoordinator};
use rostersync_model::{Avatar, Player};
use rostersync_types::AvatarId;
use std::sync::Arc;

/// Entry point for sync operations against one remote session.
///
/// Deciding when to call these is up to the caller's scheduler. Each call
/// persists the player at most once.
pub struct RosterSync {
    ctx: Arc<SyncContext>,
    detail: DetailSyncer,
    summary: SummarySyncer,
    talents: TalentRefreshCoordinator,
}

impl RosterSync {
    pub fn new(ctx: SyncContext) -> Self {
        let ctx = Arc::new(ctx);
        Self {
            detail: DetailSyncer::new(Arc::clone(&ctx)),
            summary: SummarySyncer::new(Arc::clone(&ctx)),
            talents: TalentRefreshCoordinator::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    pub fn context(&self) -> &SyncContext {
        &self.ctx
    }

    pub fn detail(&self) -> &DetailSyncer {
        &self.detail
    }

    pub fn summary(&self) -> &SummarySyncer {
        &self.summary
    }

    pub fn talents(&self) -> &TalentRefreshCoordinator {
        &self.talents
    }

    pub async fn refresh_detail(&self, player: &mut Player, force: ForceLevel) -> SyncResult<bool> {
        self.detail.refresh_detail(player, force).await
    }

    pub async fn refresh_summary(&self, player: &mut Player, force: ForceLevel) -> SyncResult<bool> {
        self.summary.refresh_summary(player, force).await
    }

    pub fn select_stale_ids(
        &self,
        player: &Player,
        selection: impl Into<AvatarSelection>,
        force: ForceLevel,
    ) -> Vec<AvatarId> {
        let selection: AvatarSelection = selection.into();
        self.talents.select_stale_ids(player, &selection, force)
    }

    pub async fn refresh_talents(
        &self,
        player: &mut Player,
        selection: impl Into<AvatarSelection>,
        force: ForceLevel,
    ) -> SyncResult<bool> {
        self.talents.refresh_talents(player, selection, force).await
    }

    /// Refreshes one avatar through the context's session. False when no
    /// session is attached.
    pub async fn refresh_one_talent(&self, avatar: &mut Avatar) -> bool {
        match self.ctx.session() {
            Some(session) => self.talents.refresh_one_talent(avatar, session.as_ref()).await,
            None => false,
        }
    }
}
