//! Account summary sync: stats, exploration and home level.

use crate::context::SyncContext;
use crate::error::SyncResult;
use crate::event::SyncEvent;
use crate::remote::{AccountSummary, RemoteExploration};
use crate::staleness::{need_refresh, ForceLevel};
use crate::tables::{self, RegionRule};
use rostersync_model::{AvatarSource, Player, PlayerInfo};
use rostersync_types::SyncStamp;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Applies a summary payload to `player` without persisting. Returns the
/// number of avatar stubs upserted.
///
/// Stubs only carry roster basics, so weapons and artifacts merged from
/// detail data survive.
pub fn apply_summary(player: &mut Player, summary: &AccountSummary, now: SyncStamp) -> usize {
    if let Some(role) = &summary.role {
        player.set_basic_data(role.level, role.nickname.clone());
    }
    let home_level = summary.homes.first().map(|home| home.level);

    for remote in &summary.avatars {
        player.upsert_avatar(remote.to_stub_patch(), AvatarSource::RemoteSummary);
    }

    player.info = PlayerInfo {
        home_level,
        stats: transform_stats(&summary.stats),
        exploration: transform_exploration(&summary.world_explorations),
    };
    player.markers.mark_summary(now);

    summary.avatars.len()
}

/// Strips the stat suffix, camel-cases the key and drops the abyss counter.
pub fn transform_stats(
    raw: &BTreeMap<String, serde_json::Value>,
) -> BTreeMap<String, serde_json::Value> {
    raw.iter()
        .filter_map(|(key, value)| {
            let key = key.replacen(tables::STAT_SUFFIX, "", 1);
            (key != tables::ABYSS_STAT_KEY).then(|| (camel_case(&key), value.clone()))
        })
        .collect()
}

/// Maps region name to exploration percentage, applying the region rules.
pub fn transform_exploration(regions: &[RemoteExploration]) -> BTreeMap<String, u32> {
    let mut exploration = BTreeMap::new();
    for region in regions {
        let key = match tables::region_rule(&region.name) {
            Some(RegionRule::Skip) => continue,
            Some(RegionRule::Rename(canonical)) => canonical,
            None => region.name.as_str(),
        };
        match region.exploration_percentage {
            Some(pct) => {
                exploration.insert(key.to_string(), pct);
            }
            None => debug!("Region {} reported no exploration percentage", region.name),
        }
    }
    exploration
}

/// `active_day` -> `activeDay`. Words split on `_`, `-` and spaces.
pub fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for word in key.split(['_', '-', ' ']).filter(|w| !w.is_empty()) {
        let lower = word.to_lowercase();
        if out.is_empty() {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Fetches and merges the account summary.
pub struct SummarySyncer {
    ctx: Arc<SyncContext>,
}

impl SummarySyncer {
    pub fn new(ctx: Arc<SyncContext>) -> Self {
        Self { ctx }
    }

    /// Refetches the summary if it is stale. Returns true when a payload was merged.
    pub async fn refresh_summary(&self, player: &mut Player, force: ForceLevel) -> SyncResult<bool> {
        let Some(session) = self.ctx.session() else {
            debug!("No remote session, skipping summary refresh for {}", player.uid);
            return Ok(false);
        };
        if !need_refresh(player.markers.summary(), force, &self.ctx.config().summary_window) {
            debug!("Summary data for {} is fresh", player.uid);
            return Ok(false);
        }

        let summary = match session.account_summary().await {
            Ok(Some(summary)) if summary.role.is_some() => summary,
            Ok(_) => {
                debug!("Summary response for {} carried no role", player.uid);
                return Ok(false);
            }
            Err(e) => {
                warn!("Summary fetch for {} failed: {}", player.uid, e);
                return Ok(false);
            }
        };

        self.merge_summary(player, &summary).await?;
        Ok(true)
    }

    /// Merges a summary payload, stamps the summary marker and persists.
    pub async fn merge_summary(&self, player: &mut Player, summary: &AccountSummary) -> SyncResult<()> {
        let avatars = apply_summary(player, summary, SyncStamp::now());
        debug!(
            "Merged summary for {}: {} avatars, {} stats, {} regions",
            player.uid,
            avatars,
            player.info.stats.len(),
            player.info.exploration.len()
        );

        self.ctx.emit(SyncEvent::SummaryMerged { avatars });
        self.ctx.store().persist(player).await
    }
}
