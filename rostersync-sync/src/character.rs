//! Static character knowledge.

use rostersync_model::{ResolvedTalent, TalentLevels, TalentSource};
use rostersync_types::{AvatarId, CharacterId};
use std::sync::Arc;

/// Read-only definition of a playable character.
pub trait Character: Send + Sync {
    fn id(&self) -> CharacterId;

    fn is_traveler(&self) -> bool;

    /// Turns raw skill levels into resolved talents, applying any
    /// constellation boosts. Returns `None` when the raw levels are unusable.
    fn resolve_talent(
        &self,
        raw: TalentLevels,
        cons: u8,
        source: TalentSource,
    ) -> Option<ResolvedTalent>;
}

/// Maps avatar ids onto character definitions.
pub trait CharacterCatalog: Send + Sync {
    fn character(&self, avatar: AvatarId) -> Option<Arc<dyn Character>>;
}
