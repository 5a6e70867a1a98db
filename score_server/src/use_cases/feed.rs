// Entry point the HTTP layer uses to reach the live feed core.

use std::sync::Arc;

use crate::domain::errors::FeedError;
use crate::domain::ports::MatchRepository;
use crate::domain::MatchEvent;
use crate::use_cases::dispatcher::{BroadcastOutcome, Dispatcher};
use crate::use_cases::lifecycle::{LifecycleSettings, StreamLifecycle, Subscription};
use crate::use_cases::registry::{SubscriberId, SubscriberRegistry};

/// Owns the subscriber registry and the components acting on it.
///
/// Built once at startup and shared through application state; `shutdown`
/// drains it so every open stream ends.
pub struct MatchFeed {
    registry: Arc<SubscriberRegistry>,
    dispatcher: Dispatcher,
    lifecycle: StreamLifecycle,
}

impl MatchFeed {
    pub fn new(repository: Arc<dyn MatchRepository>, settings: LifecycleSettings) -> Self {
        let registry = Arc::new(SubscriberRegistry::new());
        Self {
            dispatcher: Dispatcher::new(registry.clone()),
            lifecycle: StreamLifecycle::new(repository, registry.clone(), settings),
            registry,
        }
    }

    pub async fn open_stream(&self, match_id: &str) -> Result<Subscription, FeedError> {
        self.lifecycle.open(match_id).await
    }

    pub fn deregister_stream(&self, match_id: &str, subscriber_id: SubscriberId) {
        self.registry.deregister(match_id, subscriber_id);
    }

    pub fn broadcast(&self, match_id: &str, event: &MatchEvent) -> BroadcastOutcome {
        self.dispatcher.broadcast(match_id, event)
    }

    pub fn subscriber_count(&self, match_id: &str) -> usize {
        self.registry.subscriber_count(match_id)
    }

    pub fn total_subscribers(&self) -> usize {
        self.registry.total_subscribers()
    }

    pub fn evict_match(&self, match_id: &str) -> usize {
        self.registry.evict_match(match_id)
    }

    pub fn shutdown(&self) -> usize {
        self.registry.close_all()
    }
}
