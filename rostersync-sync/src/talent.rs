//! Per-avatar talent refresh with bounded concurrency and a failure breaker.
//!
//! Skill fetches for stale avatars run through a semaphore-bounded set of
//! tasks. Tasks share one failure counter; once it passes the configured
//! threshold, tasks that have not yet called out write an `Unavailable`
//! placeholder instead, which restarts the avatar's staleness window.
//!
//! Tasks never touch the player directly. Each returns its outcome and the
//! coordinating loop applies it, so records are only mutated from one place.

use crate::character::Character;
use crate::context::SyncContext;
use crate::error::SyncResult;
use crate::event::SyncEvent;
use crate::remote::{RemoteSession, RemoteSkill};
use crate::staleness::{need_refresh_at, ForceLevel};
use crate::tables;
use futures::stream::{FuturesUnordered, StreamExt};
use rostersync_model::{Avatar, Player, TalentLevels, TalentSource, TalentState};
use rostersync_types::{AvatarId, SyncStamp};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Which avatars a talent refresh considers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AvatarSelection {
    /// Every avatar in the roster.
    #[default]
    All,
    One(AvatarId),
    Many(Vec<AvatarId>),
}

impl From<AvatarId> for AvatarSelection {
    fn from(id: AvatarId) -> Self {
        Self::One(id)
    }
}

impl From<Vec<AvatarId>> for AvatarSelection {
    fn from(ids: Vec<AvatarId>) -> Self {
        Self::Many(ids)
    }
}

impl From<&[AvatarId]> for AvatarSelection {
    fn from(ids: &[AvatarId]) -> Self {
        Self::Many(ids.to_vec())
    }
}

impl From<Option<Vec<AvatarId>>> for AvatarSelection {
    fn from(ids: Option<Vec<AvatarId>>) -> Self {
        ids.map_or(Self::All, Self::Many)
    }
}

/// Tally of one talent batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TalentBatchReport {
    /// Avatars that ended with resolved talents.
    pub refreshed: usize,
    /// Refreshes that reported failure, unmapped avatars included.
    pub failed: usize,
    /// Avatars given the placeholder after the breaker tripped.
    pub skipped: usize,
}

/// Result of one task, applied by the coordinator.
enum TalentFetch {
    /// No character definition; the avatar is left untouched.
    Unmapped,
    /// The breaker had tripped before this task called out.
    Skipped,
    Fetched(TalentState),
}

/// Picks basic attack, skill and burst levels out of a raw skill list.
///
/// Skills are ordered by id. The first whose name carries the basic attack
/// marker is `a`; of the rest, the first upgradable skill is `e` and the next
/// is `q`. Layouts with several basic attacks or extra upgradable skills are
/// assigned in the same order without further checks.
pub fn pick_talent_levels(skills: &[RemoteSkill]) -> TalentLevels {
    let mut ordered: Vec<&RemoteSkill> = skills.iter().collect();
    ordered.sort_by_key(|skill| skill.id);

    let mut levels = TalentLevels::default();
    for skill in ordered {
        if skill.name.contains(tables::BASIC_ATTACK_MARKER) {
            levels.a.get_or_insert(skill.level_current);
            continue;
        }
        if skill.max_level < tables::UPGRADABLE_SKILL_MAX_LEVEL {
            continue;
        }
        if levels.e.is_none() {
            levels.e = Some(skill.level_current);
        } else if levels.q.is_none() {
            levels.q = Some(skill.level_current);
        }
    }
    levels
}

/// Fetches and resolves talents for one character. A missing or failed
/// response resolves from empty levels.
async fn fetch_talent(session: &dyn RemoteSession, character: &dyn Character, cons: u8) -> TalentState {
    let raw = match session.avatar_skills(character.id()).await {
        Ok(Some(list)) => pick_talent_levels(&list.skill_list),
        Ok(None) => {
            debug!("No skill list for character {}", character.id());
            TalentLevels::default()
        }
        Err(e) => {
            warn!("Skill fetch for character {} failed: {}", character.id(), e);
            TalentLevels::default()
        }
    };

    match character.resolve_talent(raw, cons, TalentSource::Original) {
        Some(resolved) => TalentState::Resolved(resolved),
        None => TalentState::Unavailable,
    }
}

/// Refreshes per-avatar talent levels.
pub struct TalentRefreshCoordinator {
    ctx: Arc<SyncContext>,
}

impl TalentRefreshCoordinator {
    pub fn new(ctx: Arc<SyncContext>) -> Self {
        Self { ctx }
    }

    /// Ids from `selection` whose talents are stale under `force`.
    pub fn select_stale_ids(
        &self,
        player: &Player,
        selection: &AvatarSelection,
        force: ForceLevel,
    ) -> Vec<AvatarId> {
        self.select_stale_ids_at(player, selection, force, SyncStamp::now())
    }

    /// [`Self::select_stale_ids`] against an explicit clock reading.
    pub fn select_stale_ids_at(
        &self,
        player: &Player,
        selection: &AvatarSelection,
        force: ForceLevel,
        now: SyncStamp,
    ) -> Vec<AvatarId> {
        let candidates = match selection {
            AvatarSelection::All => player.avatar_ids(),
            AvatarSelection::One(id) => vec![*id],
            AvatarSelection::Many(ids) => ids.clone(),
        };

        let config = self.ctx.config();
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|id| seen.insert(*id))
            .filter(|id| {
                player.avatar(*id).is_some_and(|avatar| {
                    let window = config.talent_window(avatar.has_talent());
                    need_refresh_at(avatar.talent.refreshed_at(), force, &window, now)
                })
            })
            .collect()
    }

    /// Refreshes stale talents for the selected avatars and persists once.
    ///
    /// Returns false without touching anything when the session is missing
    /// or not self-owned. Individual failures do not fail the call.
    pub async fn refresh_talents(
        &self,
        player: &mut Player,
        selection: impl Into<AvatarSelection>,
        force: ForceLevel,
    ) -> SyncResult<bool> {
        let Some(session) = self.ctx.self_owned_session().cloned() else {
            debug!("No self-owned session, skipping talent refresh for {}", player.uid);
            return Ok(false);
        };

        let selection: AvatarSelection = selection.into();
        let stale = self.select_stale_ids(player, &selection, force);
        if stale.len() > self.ctx.config().progress_notice_min {
            info!("Refreshing talents for {} avatars of {}", stale.len(), player.uid);
            self.ctx.emit(SyncEvent::TalentRefreshStarted {
                pending: stale.len(),
            });
        }

        if !stale.is_empty() {
            let report = self.run_batch(player, session, stale).await;
            debug!(
                "Talent batch for {}: {} refreshed, {} failed, {} skipped",
                player.uid, report.refreshed, report.failed, report.skipped
            );
            self.ctx.emit(SyncEvent::TalentRefreshFinished {
                refreshed: report.refreshed,
                failed: report.failed,
                skipped: report.skipped,
            });
        }

        self.ctx.store().persist(player).await?;
        Ok(true)
    }

    /// Refreshes one avatar's talents in place.
    ///
    /// Returns false without mutation when the session is not self-owned or
    /// the avatar has no character mapping. Otherwise the talent and its
    /// stamp are always written, and the result is true only when talents
    /// resolved.
    pub async fn refresh_one_talent(&self, avatar: &mut Avatar, session: &dyn RemoteSession) -> bool {
        if !session.is_self_owned() {
            return false;
        }
        let Some(character) = self.ctx.catalog().character(avatar.id) else {
            debug!("Avatar {} has no character mapping", avatar.id);
            return false;
        };

        let state = fetch_talent(session, character.as_ref(), avatar.cons).await;
        let resolved = matches!(state, TalentState::Resolved(_));
        avatar.set_talent(state, TalentSource::Original, SyncStamp::now());
        resolved
    }

    async fn run_batch(
        &self,
        player: &mut Player,
        session: Arc<dyn RemoteSession>,
        ids: Vec<AvatarId>,
    ) -> TalentBatchReport {
        let config = self.ctx.config();
        let threshold = config.failure_threshold;
        let semaphore = Arc::new(Semaphore::new(config.talent_concurrency));
        let failures = Arc::new(AtomicUsize::new(0));
        let mut tasks = FuturesUnordered::new();

        for id in ids {
            let Some(avatar) = player.avatar(id) else {
                continue;
            };
            let cons = avatar.cons;
            let character = self.ctx.catalog().character(id);
            let session = Arc::clone(&session);
            let semaphore = Arc::clone(&semaphore);
            let failures = Arc::clone(&failures);

            tasks.push(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (id, TalentFetch::Skipped);
                };
                if failures.load(Ordering::SeqCst) > threshold {
                    return (id, TalentFetch::Skipped);
                }
                let Some(character) = character else {
                    failures.fetch_add(1, Ordering::SeqCst);
                    return (id, TalentFetch::Unmapped);
                };

                let state = fetch_talent(session.as_ref(), character.as_ref(), cons).await;
                if !matches!(state, TalentState::Resolved(_)) {
                    failures.fetch_add(1, Ordering::SeqCst);
                }
                (id, TalentFetch::Fetched(state))
            });
        }

        let mut report = TalentBatchReport::default();
        while let Some((id, fetch)) = tasks.next().await {
            let Some(avatar) = player.avatar_mut(id) else {
                continue;
            };
            let now = SyncStamp::now();
            match fetch {
                TalentFetch::Unmapped => report.failed += 1,
                TalentFetch::Skipped => {
                    avatar.set_talent(TalentState::Unavailable, TalentSource::Original, now);
                    report.skipped += 1;
                }
                TalentFetch::Fetched(state) => {
                    if matches!(state, TalentState::Resolved(_)) {
                        report.refreshed += 1;
                    } else {
                        report.failed += 1;
                    }
                    avatar.set_talent(state, TalentSource::Original, now);
                }
            }
        }

        if report.skipped > 0 {
            warn!(
                "Talent refresh for {} stopped calling out after {} failures; {} avatars deferred",
                player.uid,
                failures.load(Ordering::SeqCst),
                report.skipped
            );
        }
        report
    }
}
