// Broadcast fan-out of match events to registered viewers.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::MatchEvent;
use crate::use_cases::registry::SubscriberRegistry;

/// Delivery counts for one broadcast. Informational only; a broadcast with
/// zero recipients or only failures is not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastOutcome {
    pub delivered: usize,
    pub pruned: usize,
}

/// Serializes a feed event into the JSON payload shared by every recipient.
pub fn encode_event(event: &MatchEvent) -> Result<Arc<str>, serde_json::Error> {
    serde_json::to_string(event).map(Arc::from)
}

/// Delivers events to every current viewer of a match.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<SubscriberRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<SubscriberRegistry>) -> Self {
        Self { registry }
    }

    /// Serializes the event once and writes it to each viewer of the match.
    ///
    /// Viewers whose write fails are deregistered on the spot and delivery
    /// continues with the rest.
    pub fn broadcast(&self, match_id: &str, event: &MatchEvent) -> BroadcastOutcome {
        let payload = match encode_event(event) {
            Ok(payload) => payload,
            Err(e) => {
                error!(match_id, kind = event.kind(), error = %e, "failed to serialize match event");
                return BroadcastOutcome::default();
            }
        };

        let outcome = self.broadcast_payload(match_id, &payload);
        if outcome.delivered > 0 || outcome.pruned > 0 {
            info!(
                match_id,
                kind = event.kind(),
                delivered = outcome.delivered,
                pruned = outcome.pruned,
                "match event broadcast"
            );
        }
        outcome
    }

    /// Writes an already serialized payload to each viewer of the match.
    pub fn broadcast_payload(&self, match_id: &str, payload: &Arc<str>) -> BroadcastOutcome {
        // Snapshot under the registry lock; writes happen outside it.
        let recipients = self.registry.snapshot(match_id);
        if recipients.is_empty() {
            debug!(match_id, "no viewers for match");
            return BroadcastOutcome::default();
        }

        let mut outcome = BroadcastOutcome::default();
        for handle in &recipients {
            if handle.try_write(payload) {
                outcome.delivered += 1;
                continue;
            }

            warn!(match_id, subscriber_id = handle.id(), "write failed; dropping viewer");
            self.registry.deregister(match_id, handle.id());
            outcome.pruned += 1;
        }
        outcome
    }
}
