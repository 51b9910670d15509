//! Shared test doubles for the sync tests.

#![allow(dead_code)]

use async_trait::async_trait;
use rostersync_model::{Player, ResolvedTalent, SkillLevel, TalentLevels, TalentSource};
use rostersync_sync::{
    AccountSummary, Character, CharacterCatalog, CharacterDetail, PlayerStore, RemoteAvatar,
    RemoteSession, RosterSync, SkillList, SyncConfig, SyncContext, SyncError, SyncEvent,
    SyncResult,
};
use rostersync_types::{AvatarId, CharacterId};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

// ── Remote session ───────────────────────────────────────────────

/// How the scripted session answers skill requests.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SkillMode {
    /// Serve scripted lists, `Ok(None)` for unscripted characters.
    Scripted,
    /// Always `Err`.
    Failing,
}

pub struct ScriptedSession {
    self_owned: bool,
    detail: Option<CharacterDetail>,
    summary: Option<AccountSummary>,
    skills: HashMap<CharacterId, SkillList>,
    skill_mode: SkillMode,
    yield_on_skills: bool,
    pub detail_calls: AtomicUsize,
    pub summary_calls: AtomicUsize,
    pub skill_calls: AtomicUsize,
}

impl ScriptedSession {
    pub fn new(self_owned: bool) -> Self {
        Self {
            self_owned,
            detail: None,
            summary: None,
            skills: HashMap::new(),
            skill_mode: SkillMode::Scripted,
            yield_on_skills: false,
            detail_calls: AtomicUsize::new(0),
            summary_calls: AtomicUsize::new(0),
            skill_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_detail(mut self, detail: CharacterDetail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_summary(mut self, summary: AccountSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_skills(mut self, character: u32, skills: SkillList) -> Self {
        self.skills.insert(CharacterId::new(character), skills);
        self
    }

    pub fn failing_skills(mut self) -> Self {
        self.skill_mode = SkillMode::Failing;
        self
    }

    /// Suspends once inside every skill request so several are in flight.
    pub fn yielding(mut self) -> Self {
        self.yield_on_skills = true;
        self
    }

    pub fn skill_calls(&self) -> usize {
        self.skill_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSession for ScriptedSession {
    fn is_self_owned(&self) -> bool {
        self.self_owned
    }

    async fn character_detail(&self) -> SyncResult<Option<CharacterDetail>> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.detail.clone())
    }

    async fn account_summary(&self) -> SyncResult<Option<AccountSummary>> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.summary.clone())
    }

    async fn avatar_skills(&self, character: CharacterId) -> SyncResult<Option<SkillList>> {
        self.skill_calls.fetch_add(1, Ordering::SeqCst);
        if self.yield_on_skills {
            tokio::task::yield_now().await;
        }
        match self.skill_mode {
            SkillMode::Scripted => Ok(self.skills.get(&character).cloned()),
            SkillMode::Failing => Err(SyncError::Remote("session expired".to_string())),
        }
    }
}

// ── Store ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Vec<Player>>,
    fail: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn persist_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    pub fn last_saved(&self) -> Option<Player> {
        self.saved.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn persist(&self, player: &Player) -> SyncResult<()> {
        if self.fail {
            return Err(SyncError::Storage("disk full".to_string()));
        }
        self.saved.lock().unwrap().push(player.clone());
        Ok(())
    }
}

// ── Characters ───────────────────────────────────────────────────

/// Resolves only when all three levels are present. Constellation 3 boosts
/// the skill and constellation 5 boosts the burst by three levels.
pub struct TestCharacter {
    id: CharacterId,
    traveler: bool,
}

impl Character for TestCharacter {
    fn id(&self) -> CharacterId {
        self.id
    }

    fn is_traveler(&self) -> bool {
        self.traveler
    }

    fn resolve_talent(
        &self,
        raw: TalentLevels,
        cons: u8,
        _source: TalentSource,
    ) -> Option<ResolvedTalent> {
        let (a, e, q) = (raw.a?, raw.e?, raw.q?);
        let boost = |level: u8, at: u8| SkillLevel {
            original: level,
            level: if cons >= at { level + 3 } else { level },
        };
        Some(ResolvedTalent {
            a: SkillLevel::unboosted(a),
            e: boost(e, 3),
            q: boost(q, 5),
        })
    }
}

#[derive(Default)]
pub struct StaticCatalog {
    characters: HashMap<AvatarId, Arc<dyn Character>>,
}

impl StaticCatalog {
    /// Maps each avatar id onto a character with the same id.
    pub fn with_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut catalog = Self::default();
        for id in ids {
            catalog.characters.insert(
                AvatarId::new(id),
                Arc::new(TestCharacter {
                    id: CharacterId::new(id),
                    traveler: false,
                }),
            );
        }
        catalog
    }
}

impl CharacterCatalog for StaticCatalog {
    fn character(&self, avatar: AvatarId) -> Option<Arc<dyn Character>> {
        self.characters.get(&avatar).cloned()
    }
}

// ── Wiring ───────────────────────────────────────────────────────

/// Routes sync logs to the test output. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Harness {
    pub sync: RosterSync,
    pub session: Option<Arc<ScriptedSession>>,
    pub store: Arc<MemoryStore>,
    pub events: mpsc::Receiver<SyncEvent>,
}

pub fn harness(session: Option<ScriptedSession>, catalog: StaticCatalog) -> Harness {
    harness_with_config(session, catalog, SyncConfig::default())
}

pub fn harness_with_config(
    session: Option<ScriptedSession>,
    catalog: StaticCatalog,
    config: SyncConfig,
) -> Harness {
    init_tracing();
    let store = Arc::new(MemoryStore::default());
    let session = session.map(Arc::new);
    let (tx, rx) = mpsc::channel(64);

    let mut builder = SyncContext::builder()
        .store(store.clone())
        .catalog(Arc::new(catalog))
        .events(tx)
        .config(config);
    if let Some(session) = &session {
        builder = builder.session(session.clone());
    }

    Harness {
        sync: RosterSync::new(builder.build().unwrap()),
        session,
        store,
        events: rx,
    }
}

pub fn drain_events(rx: &mut mpsc::Receiver<SyncEvent>) -> Vec<SyncEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

// ── Payload builders ─────────────────────────────────────────────

pub fn remote_avatar(id: u32) -> RemoteAvatar {
    serde_json::from_value(json!({
        "id": id,
        "level": 90,
        "actived_constellation_num": 2,
        "fetter": 10,
        "element": "Pyro",
        "weapon": {
            "name": "Wolf's Gravestone",
            "rarity": 5,
            "level": 90,
            "promote_level": 6,
            "affix_level": 1
        },
        "reliquaries": [
            {"name": "Witch's Flower of Blaze", "pos_name": "生之花", "level": 20},
            {"name": "Witch's Ever-Burning Plume", "pos_name": "死之羽", "level": 16}
        ]
    }))
    .unwrap()
}

pub fn detail_with_ids(ids: impl IntoIterator<Item = u32>) -> CharacterDetail {
    CharacterDetail {
        role: Some(serde_json::from_value(json!({"nickname": "Lumine", "level": 58})).unwrap()),
        avatars: Some(ids.into_iter().map(remote_avatar).collect()),
    }
}

/// Scripted skill list: basic attack, skill and burst at the given levels
/// plus a passive, deliberately out of id order.
pub fn skill_list(a: u8, e: u8, q: u8) -> SkillList {
    serde_json::from_value(json!({
        "skill_list": [
            {"id": 30, "name": "元素爆发", "max_level": 10, "level_current": q},
            {"id": 40, "name": "固有天赋", "max_level": 1, "level_current": 1},
            {"id": 10, "name": "普通攻击·斩", "max_level": 10, "level_current": a},
            {"id": 20, "name": "元素战技", "max_level": 10, "level_current": e}
        ]
    }))
    .unwrap()
}
