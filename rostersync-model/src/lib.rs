//! Local record model for rostersync.
//!
//! Defines the cached view of a game account that the sync layer mutates:
//! - [`Player`]: account basics, the avatar roster, the summary blob and
//!   per-category sync markers
//! - [`Avatar`]: one owned character with weapon, artifacts and talents
//! - [`TalentSnapshot`]: per-avatar skill levels plus their own staleness stamp
//!
//! The model performs no I/O. Persistence and remote access are collaborators
//! owned by the sync crate.

mod avatar;
mod player;
mod talent;

pub use avatar::{ArtifactPiece, ArtifactSlot, Avatar, AvatarPatch, AvatarSource, Weapon};
pub use player::{Player, PlayerInfo, SyncMarkers};
pub use talent::{ResolvedTalent, SkillLevel, TalentLevels, TalentSnapshot, TalentSource, TalentState};
