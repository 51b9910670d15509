//! Progress notifications emitted while syncing.

use rostersync_types::AvatarId;

/// Sent on the context's event channel, if one is attached. Delivery is
/// best effort: a full or closed channel drops the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A detail payload was merged.
    DetailMerged {
        avatars: usize,
        evicted: Vec<AvatarId>,
    },
    /// A summary payload was merged.
    SummaryMerged { avatars: usize },
    /// A talent batch large enough to take a while is starting.
    TalentRefreshStarted { pending: usize },
    /// A talent batch settled.
    TalentRefreshFinished {
        refreshed: usize,
        failed: usize,
        skipped: usize,
    },
}
