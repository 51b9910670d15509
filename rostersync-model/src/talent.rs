//! Talent (skill level) records.
//!
//! Raw levels come from the remote skill list; the character definition turns
//! them into a [`ResolvedTalent`], possibly adding constellation boosts.

use rostersync_types::SyncStamp;
use serde::{Deserialize, Serialize};

/// Raw skill levels picked from a remote skill list. Missing slots stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentLevels {
    /// Basic attack.
    pub a: Option<u8>,
    /// Elemental skill.
    pub e: Option<u8>,
    /// Elemental burst.
    pub q: Option<u8>,
}

impl TalentLevels {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a.is_none() && self.e.is_none() && self.q.is_none()
    }
}

/// A single resolved skill: the level as fetched and the effective level
/// after any constellation boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevel {
    pub original: u8,
    pub level: u8,
}

impl SkillLevel {
    #[must_use]
    pub const fn unboosted(level: u8) -> Self {
        Self {
            original: level,
            level,
        }
    }
}

/// Fully resolved talent levels for the three skill slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTalent {
    pub a: SkillLevel,
    pub e: SkillLevel,
    pub q: SkillLevel,
}

/// Where a talent value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TalentSource {
    /// Pulled from the account's own skill endpoint.
    #[default]
    Original,
    /// Read from a showcase profile.
    Profile,
}

/// Outcome of the last talent refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum TalentState {
    /// Never refreshed.
    #[default]
    Unknown,
    /// A refresh ran and produced nothing usable.
    Unavailable,
    Resolved(ResolvedTalent),
}

/// Talent state plus its own staleness stamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentSnapshot {
    pub state: TalentState,
    pub source: TalentSource,
    refreshed_at: Option<SyncStamp>,
}

impl TalentSnapshot {
    /// Whether the snapshot holds resolved levels.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, TalentState::Resolved(_))
    }

    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedTalent> {
        match &self.state {
            TalentState::Resolved(talent) => Some(talent),
            _ => None,
        }
    }

    /// When the last refresh finished, if ever.
    #[must_use]
    pub fn refreshed_at(&self) -> Option<SyncStamp> {
        self.refreshed_at
    }

    /// Replaces the state and advances the stamp. The stamp never moves back.
    pub fn record(&mut self, state: TalentState, source: TalentSource, now: SyncStamp) {
        self.state = state;
        self.source = source;
        self.refreshed_at = Some(match self.refreshed_at {
            Some(prev) => prev.latest(now),
            None => now,
        });
    }
}
