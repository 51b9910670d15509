//! Error types for the sync layer.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
///
/// Expected absence of data (no session, empty payloads, unmapped characters)
/// is not an error; those paths report `Ok(false)`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Persisting the player record failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The remote session reported a failure.
    #[error("remote error: {0}")]
    Remote(String),

    /// A required collaborator was not supplied.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// Configuration values are unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
