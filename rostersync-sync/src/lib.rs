//! Staleness-gated sync between a cached player record and a remote
//! game-account service.
//!
//! # Components
//!
//! - **Staleness**: decides per data category whether a refetch is due,
//!   from the last sync stamp, a caller force level and a minute window
//! - **Detail**: merges per-avatar roster, weapon and artifact data, and
//!   evicts avatars missing from a full roster snapshot
//! - **Summary**: merges account stats, exploration and home level
//! - **Talent**: refreshes skill levels for stale avatars with at most a few
//!   fetches in flight and a shared failure breaker
//!
//! Remote access, persistence and character knowledge are collaborators
//! supplied through [`SyncContext`].
//!
//! # Example
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use rostersync_sync::{CharacterCatalog, PlayerStore, SyncResult};
//! use rostersync_model::Player;
//! use rostersync_sync::{ForceLevel, RosterSync, SyncContext};
//!
//! # async fn run(store: Arc<dyn PlayerStore>, catalog: Arc<dyn CharacterCatalog>) -> SyncResult<()> {
//! let ctx = SyncContext::builder().store(store).catalog(catalog).build()?;
//! let sync = RosterSync::new(ctx);
//!
//! let mut player = Player::new("100000001");
//! // No session attached: nothing is fetched.
//! assert!(!sync.refresh_detail(&mut player, ForceLevel::Default).await?);
//! # Ok(())
//! # }
//! ```

pub mod character;
mod config;
mod context;
pub mod detail;
mod engine;
mod error;
mod event;
pub mod remote;
pub mod staleness;
pub mod store;
pub mod summary;
pub mod tables;
pub mod talent;

pub use character::{Character, CharacterCatalog};
pub use config::SyncConfig;
pub use context::{SyncContext, SyncContextBuilder};
pub use detail::{apply_detail, DetailMerge, DetailSyncer};
pub use engine::RosterSync;
pub use error::{SyncError, SyncResult};
pub use event::SyncEvent;
pub use remote::{
    AccountSummary, CharacterDetail, RemoteAvatar, RemoteCostume, RemoteExploration, RemoteHome,
    RemoteReliquary, RemoteRole, RemoteSession, RemoteSkill, RemoteWeapon, SkillList,
};
pub use staleness::{need_refresh, need_refresh_at, ForceLevel, StalenessWindow};
pub use store::PlayerStore;
pub use summary::{apply_summary, SummarySyncer};
pub use talent::{pick_talent_levels, AvatarSelection, TalentBatchReport, TalentRefreshCoordinator};
