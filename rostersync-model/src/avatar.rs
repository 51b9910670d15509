use crate::talent::{TalentSnapshot, TalentSource, TalentState};
use rostersync_types::{AvatarId, SyncStamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where the most recent write to an avatar came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvatarSource {
    /// Full per-avatar detail from the remote character endpoint.
    RemoteDetail,
    /// Lightweight stub from the remote account summary.
    RemoteSummary,
    /// Showcase profile data. Avatars written from here are pinned.
    Profile,
}

impl fmt::Display for AvatarSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::RemoteDetail => "remote-detail",
            Self::RemoteSummary => "remote-summary",
            Self::Profile => "profile",
        };
        f.write_str(tag)
    }
}

/// One of the five equipment positions an avatar holds artifacts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ArtifactSlot {
    Flower = 1,
    Plume = 2,
    Sands = 3,
    Goblet = 4,
    Circlet = 5,
}

impl ArtifactSlot {
    /// All slots in id order.
    pub const ALL: [ArtifactSlot; 5] = [
        Self::Flower,
        Self::Plume,
        Self::Sands,
        Self::Goblet,
        Self::Circlet,
    ];

    /// Numeric slot id, 1..=5.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ArtifactSlot {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Flower),
            2 => Ok(Self::Plume),
            3 => Ok(Self::Sands),
            4 => Ok(Self::Goblet),
            5 => Ok(Self::Circlet),
            other => Err(format!("artifact slot out of range: {other}")),
        }
    }
}

impl From<ArtifactSlot> for u8 {
    fn from(slot: ArtifactSlot) -> Self {
        slot.index()
    }
}

/// An artifact equipped in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPiece {
    pub name: String,
    pub level: u32,
}

/// The equipped weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Star rarity.
    pub rarity: u8,
    pub level: u32,
    /// Ascension phase.
    pub promote: u8,
    /// Refinement rank.
    pub affix: u8,
}

/// A playable character owned by the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub id: AvatarId,
    pub level: u32,
    /// Constellation rank.
    pub cons: u8,
    pub fetter: u32,
    /// Lowercase element token, e.g. `"pyro"`.
    pub element: String,
    pub costume: Option<u32>,
    pub weapon: Option<Weapon>,
    pub artifacts: BTreeMap<ArtifactSlot, ArtifactPiece>,
    pub talent: TalentSnapshot,
    /// Pinned avatars survive roster eviction.
    pub profile_pinned: bool,
    pub source: AvatarSource,
}

impl Avatar {
    /// Creates an avatar from a patch. Fields the patch does not carry start empty.
    pub fn from_patch(patch: AvatarPatch, source: AvatarSource) -> Self {
        let mut avatar = Self {
            id: patch.id,
            level: 0,
            cons: 0,
            fetter: 0,
            element: String::new(),
            costume: None,
            weapon: None,
            artifacts: BTreeMap::new(),
            talent: TalentSnapshot::default(),
            profile_pinned: false,
            source,
        };
        avatar.apply(patch, source);
        avatar
    }

    /// Applies a patch. Optional parts of the patch that are `None` leave the
    /// existing values alone.
    pub fn apply(&mut self, patch: AvatarPatch, source: AvatarSource) {
        self.level = patch.level;
        self.cons = patch.cons;
        self.fetter = patch.fetter;
        self.element = patch.element;
        if let Some(costume) = patch.costume {
            self.costume = Some(costume);
        }
        if let Some(weapon) = patch.weapon {
            self.weapon = Some(weapon);
        }
        if let Some(artifacts) = patch.artifacts {
            self.artifacts = artifacts;
        }
        if source == AvatarSource::Profile {
            self.profile_pinned = true;
        }
        self.source = source;
    }

    /// Whether a confirmed talent snapshot is held.
    #[must_use]
    pub fn has_talent(&self) -> bool {
        self.talent.is_confirmed()
    }

    /// Records a talent refresh outcome and stamps it.
    pub fn set_talent(&mut self, state: TalentState, source: TalentSource, now: SyncStamp) {
        self.talent.record(state, source, now);
    }
}

/// Incoming avatar data from one remote payload.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarPatch {
    pub id: AvatarId,
    pub level: u32,
    pub cons: u8,
    pub fetter: u32,
    pub element: String,
    pub costume: Option<u32>,
    pub weapon: Option<Weapon>,
    pub artifacts: Option<BTreeMap<ArtifactSlot, ArtifactPiece>>,
}

impl AvatarPatch {
    /// Creates a stub patch carrying only the roster basics.
    pub fn new(id: AvatarId, level: u32, cons: u8, fetter: u32, element: impl Into<String>) -> Self {
        Self {
            id,
            level,
            cons,
            fetter,
            element: element.into(),
            costume: None,
            weapon: None,
            artifacts: None,
        }
    }

    pub fn with_costume(mut self, costume: u32) -> Self {
        self.costume = Some(costume);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_artifacts(mut self, artifacts: BTreeMap<ArtifactSlot, ArtifactPiece>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }
}
