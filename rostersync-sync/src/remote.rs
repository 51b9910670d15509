//! Remote session abstraction and the payload shapes it returns.
//!
//! The transport and authentication behind a session are out of scope here;
//! this module only fixes the shape of the data the syncers consume. Lists
//! default to empty so partially populated payloads still deserialize.

use crate::error::SyncResult;
use crate::tables;
use async_trait::async_trait;
use rostersync_model::{ArtifactPiece, ArtifactSlot, AvatarPatch, Weapon};
use rostersync_types::{AvatarId, CharacterId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Account basics attached to most responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteRole {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteWeapon {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rarity: u8,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub promote_level: u8,
    #[serde(default)]
    pub affix_level: u8,
}

impl From<&RemoteWeapon> for Weapon {
    fn from(w: &RemoteWeapon) -> Self {
        Weapon {
            name: w.name.clone(),
            rarity: w.rarity,
            level: w.level,
            promote: w.promote_level,
            affix: w.affix_level,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteReliquary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pos_name: String,
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteCostume {
    #[serde(default)]
    pub id: u32,
}

/// One avatar as reported by either the detail or the summary endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteAvatar {
    pub id: AvatarId,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub actived_constellation_num: u8,
    #[serde(default)]
    pub fetter: u32,
    #[serde(default)]
    pub element: String,
    #[serde(default)]
    pub costumes: Vec<RemoteCostume>,
    #[serde(default)]
    pub weapon: Option<RemoteWeapon>,
    #[serde(default)]
    pub reliquaries: Vec<RemoteReliquary>,
}

impl RemoteAvatar {
    /// Roster basics only: id, level, constellation, fetter and element.
    pub fn to_stub_patch(&self) -> AvatarPatch {
        AvatarPatch::new(
            self.id,
            self.level,
            self.actived_constellation_num,
            self.fetter,
            self.element.to_lowercase(),
        )
    }

    /// Basics plus costume, weapon and the artifact set.
    pub fn to_detail_patch(&self) -> AvatarPatch {
        let mut patch = self.to_stub_patch().with_artifacts(self.artifact_set());
        if let Some(costume) = self.costumes.first().filter(|c| c.id != 0) {
            patch = patch.with_costume(costume.id);
        }
        if let Some(weapon) = &self.weapon {
            patch = patch.with_weapon(weapon.into());
        }
        patch
    }

    /// Maps reliquaries onto the five canonical slots. Entries without a
    /// name or with an unrecognized position are dropped.
    pub fn artifact_set(&self) -> BTreeMap<ArtifactSlot, ArtifactPiece> {
        let mut artifacts = BTreeMap::new();
        for piece in &self.reliquaries {
            if piece.name.is_empty() {
                continue;
            }
            if let Some(slot) = tables::artifact_slot(&piece.pos_name) {
                artifacts.insert(
                    slot,
                    ArtifactPiece {
                        name: piece.name.clone(),
                        level: piece.level,
                    },
                );
            }
        }
        artifacts
    }
}

/// Response of the character detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterDetail {
    #[serde(default)]
    pub role: Option<RemoteRole>,
    /// `None` when the response carried no avatar list at all.
    #[serde(default)]
    pub avatars: Option<Vec<RemoteAvatar>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteExploration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exploration_percentage: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteHome {
    #[serde(default)]
    pub level: u32,
}

/// Response of the account summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    #[serde(default)]
    pub role: Option<RemoteRole>,
    #[serde(default)]
    pub avatars: Vec<RemoteAvatar>,
    #[serde(default)]
    pub stats: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub world_explorations: Vec<RemoteExploration>,
    #[serde(default)]
    pub homes: Vec<RemoteHome>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSkill {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub max_level: u8,
    #[serde(default)]
    pub level_current: u8,
}

/// Response of the per-character skill endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillList {
    #[serde(default)]
    pub skill_list: Vec<RemoteSkill>,
}

/// An authenticated connection to the game-account service.
///
/// `Ok(None)` and `Err(_)` are both treated as "no data" by the syncers; the
/// distinction only affects logging.
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Whether the session belongs to the account being synced. Skill data
    /// is only available to the owner.
    fn is_self_owned(&self) -> bool;

    /// Fetches per-avatar detail for the whole roster.
    async fn character_detail(&self) -> SyncResult<Option<CharacterDetail>>;

    /// Fetches the account summary.
    async fn account_summary(&self) -> SyncResult<Option<AccountSummary>>;

    /// Fetches the raw skill list for one character.
    async fn avatar_skills(&self, character: CharacterId) -> SyncResult<Option<SkillList>>;
}
