//! Transport-agnostic group pub/sub abstraction.
//!
//! Sessions talk to named broadcast groups only through [`ChannelLayer`],
//! so the process-local [`super::GroupRegistry`] could be swapped for a
//! distributed backend without touching any caller.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, GroupEvent};

/// Per-member delivery handle.
///
/// Unbounded so that fan-out never blocks on a slow member; a member that
/// stops draining its queue costs memory, not group latency.
pub type EventSink = mpsc::UnboundedSender<GroupEvent>;

/// Named-group pub/sub operations.
///
/// None of the operations fail observably: joining an existing membership,
/// leaving a group never joined, and publishing to an absent or empty
/// group are all silent no-ops.
#[async_trait]
pub trait ChannelLayer: Send + Sync + fmt::Debug {
    /// Registers `member`'s sink under `group`, creating the group lazily.
    ///
    /// Idempotent: re-joining replaces the stored sink and never produces
    /// a duplicate membership.
    async fn join(&self, group: &str, member: ConnectionId, sink: EventSink);

    /// Removes `member` from `group` if present; no-op otherwise.
    async fn leave(&self, group: &str, member: ConnectionId);

    /// Delivers `event` to every current member of `group`, including the
    /// sender if the sender is a member. Closed sinks are skipped.
    async fn publish(&self, group: &str, event: GroupEvent);

    /// Returns the number of members currently in `group` (0 if absent).
    async fn member_count(&self, group: &str) -> usize;
}
