use crate::avatar::{Avatar, AvatarPatch, AvatarSource};
use rostersync_types::{AvatarId, SyncStamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Account-level summary data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub home_level: Option<u32>,
    /// camelCase stat name -> value. Never holds the abyss counter.
    pub stats: BTreeMap<String, serde_json::Value>,
    /// Region name -> exploration percentage (per mille, as reported).
    pub exploration: BTreeMap<String, u32>,
}

/// When each category of remote data was last merged.
///
/// Stamps only move forward; the only way to set one is through
/// [`SyncMarkers::mark_detail`] or [`SyncMarkers::mark_summary`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMarkers {
    detail: Option<SyncStamp>,
    summary: Option<SyncStamp>,
}

impl SyncMarkers {
    #[must_use]
    pub fn detail(&self) -> Option<SyncStamp> {
        self.detail
    }

    #[must_use]
    pub fn summary(&self) -> Option<SyncStamp> {
        self.summary
    }

    pub fn mark_detail(&mut self, now: SyncStamp) {
        self.detail = Some(advance(self.detail, now));
    }

    pub fn mark_summary(&mut self, now: SyncStamp) {
        self.summary = Some(advance(self.summary, now));
    }
}

fn advance(prev: Option<SyncStamp>, now: SyncStamp) -> SyncStamp {
    prev.map_or(now, |p| p.latest(now))
}

/// The cached view of one game account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub uid: String,
    pub level: u32,
    pub name: String,
    avatars: BTreeMap<AvatarId, Avatar>,
    pub info: PlayerInfo,
    pub markers: SyncMarkers,
}

impl Player {
    /// Creates an empty player record.
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }

    /// Updates account level and nickname.
    pub fn set_basic_data(&mut self, level: u32, name: impl Into<String>) {
        self.level = level;
        self.name = name.into();
    }

    pub fn avatar(&self, id: AvatarId) -> Option<&Avatar> {
        self.avatars.get(&id)
    }

    pub fn avatar_mut(&mut self, id: AvatarId) -> Option<&mut Avatar> {
        self.avatars.get_mut(&id)
    }

    /// Inserts a new avatar or applies the patch to the cached one.
    pub fn upsert_avatar(&mut self, patch: AvatarPatch, source: AvatarSource) -> &mut Avatar {
        use std::collections::btree_map::Entry;

        match self.avatars.entry(patch.id) {
            Entry::Occupied(entry) => {
                let avatar = entry.into_mut();
                avatar.apply(patch, source);
                avatar
            }
            Entry::Vacant(entry) => entry.insert(Avatar::from_patch(patch, source)),
        }
    }

    /// Iterates avatars in id order.
    pub fn avatars(&self) -> impl Iterator<Item = &Avatar> {
        self.avatars.values()
    }

    pub fn avatar_ids(&self) -> Vec<AvatarId> {
        self.avatars.keys().copied().collect()
    }

    pub fn avatar_count(&self) -> usize {
        self.avatars.len()
    }

    /// Keeps only avatars for which `keep` returns true. Returns the ids removed.
    pub fn retain_avatars(&mut self, mut keep: impl FnMut(&Avatar) -> bool) -> Vec<AvatarId> {
        let mut removed = Vec::new();
        self.avatars.retain(|id, avatar| {
            let kept = keep(avatar);
            if !kept {
                removed.push(*id);
            }
            kept
        });
        removed
    }
}
