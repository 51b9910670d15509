//! Per-avatar detail sync: roster, weapons and artifacts.

use crate::context::SyncContext;
use crate::error::SyncResult;
use crate::event::SyncEvent;
use crate::remote::CharacterDetail;
use crate::staleness::{need_refresh, ForceLevel};
use rostersync_model::{AvatarSource, Player};
use rostersync_types::{AvatarId, SyncStamp};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What a detail merge changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailMerge {
    /// Avatars upserted from the payload.
    pub merged: usize,
    /// Cached avatars dropped because a full roster did not mention them.
    pub evicted: Vec<AvatarId>,
}

/// Applies a detail payload to `player` without persisting.
///
/// Eviction only runs when the payload lists more than `full_roster_min`
/// distinct avatars; smaller payloads are partial queries and never remove
/// anything. Pinned avatars are always kept.
pub fn apply_detail(
    player: &mut Player,
    detail: &CharacterDetail,
    full_roster_min: usize,
    now: SyncStamp,
) -> DetailMerge {
    if let Some(role) = &detail.role {
        player.set_basic_data(role.level, role.nickname.clone());
    }

    let mut seen = HashSet::new();
    for remote in detail.avatars.iter().flatten() {
        player.upsert_avatar(remote.to_detail_patch(), AvatarSource::RemoteDetail);
        seen.insert(remote.id);
    }

    let evicted = if seen.len() > full_roster_min {
        player.retain_avatars(|avatar| seen.contains(&avatar.id) || avatar.profile_pinned)
    } else {
        Vec::new()
    };

    player.markers.mark_detail(now);

    DetailMerge {
        merged: seen.len(),
        evicted,
    }
}

/// Fetches and merges per-avatar detail data.
pub struct DetailSyncer {
    ctx: Arc<SyncContext>,
}

impl DetailSyncer {
    pub fn new(ctx: Arc<SyncContext>) -> Self {
        Self { ctx }
    }

    /// Refetches detail data if it is stale. Returns true when a payload was merged.
    pub async fn refresh_detail(&self, player: &mut Player, force: ForceLevel) -> SyncResult<bool> {
        let Some(session) = self.ctx.session() else {
            debug!("No remote session, skipping detail refresh for {}", player.uid);
            return Ok(false);
        };
        if !need_refresh(player.markers.detail(), force, &self.ctx.config().detail_window) {
            debug!("Detail data for {} is fresh", player.uid);
            return Ok(false);
        }

        let detail = match session.character_detail().await {
            Ok(Some(detail)) if detail.avatars.is_some() => detail,
            Ok(_) => {
                debug!("Detail response for {} carried no avatars", player.uid);
                return Ok(false);
            }
            Err(e) => {
                warn!("Detail fetch for {} failed: {}", player.uid, e);
                return Ok(false);
            }
        };

        self.merge_detail(player, &detail).await?;
        Ok(true)
    }

    /// Merges a detail payload, stamps the detail marker and persists.
    pub async fn merge_detail(
        &self,
        player: &mut Player,
        detail: &CharacterDetail,
    ) -> SyncResult<DetailMerge> {
        let merge = apply_detail(
            player,
            detail,
            self.ctx.config().full_roster_min,
            SyncStamp::now(),
        );

        if !merge.evicted.is_empty() {
            info!(
                "Evicted {} cached avatars missing from full roster of {}",
                merge.evicted.len(),
                player.uid
            );
        }
        debug!("Merged detail for {} avatars of {}", merge.merged, player.uid);

        self.ctx.emit(SyncEvent::DetailMerged {
            avatars: merge.merged,
            evicted: merge.evicted.clone(),
        });
        self.ctx.store().persist(player).await?;
        Ok(merge)
    }
}
