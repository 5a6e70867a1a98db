// Per-match subscriber registry for live score streams.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info};

/// Identity of one viewer connection.
pub type SubscriberId = u64;

/// Write side of one viewer's stream.
///
/// The transport owns the receiving end; the registry only keeps this sender.
/// Dropping the last sender ends the viewer's stream.
#[derive(Debug, Clone)]
pub struct SubscriberHandle {
    id: SubscriberId,
    tx: mpsc::Sender<Arc<str>>,
}

impl SubscriberHandle {
    pub fn new(id: SubscriberId, tx: mpsc::Sender<Arc<str>>) -> Self {
        Self { id, tx }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Attempts a non-blocking write of one serialized payload.
    ///
    /// Returns false when the viewer is gone or its buffer is full; both are
    /// treated as a dead subscriber by the dispatcher.
    pub fn try_write(&self, payload: &Arc<str>) -> bool {
        self.tx.try_send(Arc::clone(payload)).is_ok()
    }
}

#[derive(Debug, Default)]
struct Subscribers {
    // Match id to its live viewers. Sets are never left empty.
    by_match: HashMap<String, HashMap<SubscriberId, SubscriberHandle>>,
    // Reverse index so a connection belongs to at most one match.
    owner: HashMap<SubscriberId, String>,
}

impl Subscribers {
    fn detach(&mut self, match_id: &str, id: SubscriberId) -> Option<SubscriberHandle> {
        if self.owner.get(&id).map(String::as_str) != Some(match_id) {
            return None;
        }
        self.owner.remove(&id);

        let set = self.by_match.get_mut(match_id)?;
        let handle = set.remove(&id);
        if set.is_empty() {
            self.by_match.remove(match_id);
        }
        handle
    }
}

/// Thread-safe map from match id to the set of open viewer streams.
///
/// A single mutex covers registration, deregistration and the snapshot taken
/// for a broadcast, so a set is never iterated while it mutates. The lock is
/// never held across an await point.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    inner: Mutex<Subscribers>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        // Registry state stays consistent even if a holder panicked mid-step.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a viewer to a match. Returns false if it was already registered
    /// there; a viewer registered under another match is moved.
    pub fn register(&self, match_id: &str, handle: SubscriberHandle) -> bool {
        let id = handle.id();
        let mut subscribers = self.lock();

        if let Some(current) = subscribers.owner.get(&id).cloned() {
            if current == match_id {
                return false;
            }
            subscribers.detach(&current, id);
            debug!(subscriber_id = id, from = %current, to = %match_id, "viewer moved between matches");
        }

        subscribers.owner.insert(id, match_id.to_string());
        let set = subscribers.by_match.entry(match_id.to_string()).or_default();
        set.insert(id, handle);
        let viewers = set.len();

        info!(match_id, subscriber_id = id, viewers, "viewer registered");
        true
    }

    /// Removes a viewer from a match. Unknown ids and matches are ignored.
    pub fn deregister(&self, match_id: &str, id: SubscriberId) -> bool {
        let removed = {
            let mut subscribers = self.lock();
            subscribers.detach(match_id, id)
        };

        match removed {
            Some(_) => {
                info!(
                    match_id,
                    subscriber_id = id,
                    viewers = self.subscriber_count(match_id),
                    "viewer deregistered"
                );
                true
            }
            None => false,
        }
    }

    pub fn subscriber_count(&self, match_id: &str) -> usize {
        self.lock().by_match.get(match_id).map_or(0, HashMap::len)
    }

    pub fn total_subscribers(&self) -> usize {
        self.lock().by_match.values().map(HashMap::len).sum()
    }

    /// Ids of matches that currently have at least one viewer.
    pub fn match_ids(&self) -> Vec<String> {
        self.lock().by_match.keys().cloned().collect()
    }

    /// Point-in-time copy of a match's viewers, taken under the registry lock.
    pub fn snapshot(&self, match_id: &str) -> Vec<SubscriberHandle> {
        self.lock()
            .by_match
            .get(match_id)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Drops every viewer of a match, ending their streams.
    pub fn evict_match(&self, match_id: &str) -> usize {
        let evicted = {
            let mut subscribers = self.lock();
            let Some(set) = subscribers.by_match.remove(match_id) else {
                return 0;
            };
            for id in set.keys() {
                subscribers.owner.remove(id);
            }
            set.len()
        };

        info!(match_id, evicted, "match viewers evicted");
        evicted
    }

    /// Drains the registry, ending every open stream. Used at shutdown.
    pub fn close_all(&self) -> usize {
        let drained = {
            let mut subscribers = self.lock();
            subscribers.owner.clear();
            std::mem::take(&mut subscribers.by_match)
        };

        let closed = drained.values().map(HashMap::len).sum();
        info!(closed, matches = drained.len(), "registry drained");
        closed
    }
}
