//! Process-local implementation of the channel layer.
//!
//! [`GroupRegistry`] keeps named groups in a `RwLock<HashMap>` where each
//! group maps member connection IDs to their delivery sinks. join/leave
//! take the write lock, publish the read lock, so every operation appears
//! atomic to observers: a publish never sees a half-updated member set.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::channel_layer::{ChannelLayer, EventSink};
use super::{ConnectionId, GroupEvent};

/// In-memory registry of named broadcast groups.
///
/// Groups are created lazily on first join and discarded once their
/// member set becomes empty; lifetime is bounded by process uptime.
///
/// # Concurrency
///
/// - Membership mutation is serialized through the write lock.
/// - Publishes run under the read lock; delivery uses unbounded queues
///   and never awaits a member.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    groups: RwLock<HashMap<String, HashMap<ConnectionId, EventSink>>>,
}

impl GroupRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live (non-empty) groups.
    pub async fn group_count(&self) -> usize {
        self.groups.read().await.len()
    }
}

#[async_trait]
impl ChannelLayer for GroupRegistry {
    async fn join(&self, group: &str, member: ConnectionId, sink: EventSink) {
        let mut groups = self.groups.write().await;
        let members = groups.entry(group.to_string()).or_default();
        // Re-join replaces the sink; the set never holds a member twice.
        members.insert(member, sink);
        tracing::debug!(%member, group, members = members.len(), "joined group");
    }

    async fn leave(&self, group: &str, member: ConnectionId) {
        let mut groups = self.groups.write().await;
        let Some(members) = groups.get_mut(group) else {
            return;
        };
        if members.remove(&member).is_some() {
            tracing::debug!(%member, group, members = members.len(), "left group");
        }
        if members.is_empty() {
            groups.remove(group);
        }
    }

    async fn publish(&self, group: &str, event: GroupEvent) {
        let groups = self.groups.read().await;
        let Some(members) = groups.get(group) else {
            return;
        };
        let mut delivered = 0usize;
        for (member, sink) in members {
            // A closed sink means the member is tearing down; its own
            // disconnect path will run leave().
            if sink.send(event.clone()).is_ok() {
                delivered = delivered.saturating_add(1);
            } else {
                tracing::debug!(%member, group, "skipped closed member sink");
            }
        }
        tracing::debug!(group, kind = event.kind(), delivered, "published event");
    }

    async fn member_count(&self, group: &str) -> usize {
        self.groups.read().await.get(group).map_or(0, |m| m.len())
    }
}
