//! Core type definitions for rostersync.
//!
//! This crate defines the small, domain-agnostic types shared by the record
//! model and the sync layer:
//! - Avatar and character identifiers
//! - Epoch-millisecond sync stamps used by staleness tracking

mod ids;
mod stamp;

pub use ids::{AvatarId, CharacterId};
pub use stamp::SyncStamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
