// Connection lifecycle for live match streams: open, keepalive, close.

use std::sync::Arc;
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::domain::errors::FeedError;
use crate::domain::ports::MatchRepository;
use crate::domain::MatchEvent;
use crate::use_cases::dispatcher::encode_event;
use crate::use_cases::ids::next_subscriber_id;
use crate::use_cases::registry::{SubscriberHandle, SubscriberId, SubscriberRegistry};

/// Settings applied to every viewer connection.
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    /// Interval between keepalive comments on an idle stream.
    pub heartbeat_interval: Duration,
    /// Payloads buffered per viewer before it is considered too slow.
    pub subscriber_buffer: usize,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(30),
            subscriber_buffer: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// One frame of a viewer's stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamFrame {
    /// Serialized match event.
    Data(Arc<str>),
    /// Keepalive with no event data.
    Heartbeat,
}

/// Opens viewer subscriptions against the registry.
pub struct StreamLifecycle {
    repository: Arc<dyn MatchRepository>,
    registry: Arc<SubscriberRegistry>,
    settings: LifecycleSettings,
}

impl StreamLifecycle {
    pub fn new(
        repository: Arc<dyn MatchRepository>,
        registry: Arc<SubscriberRegistry>,
        settings: LifecycleSettings,
    ) -> Self {
        Self {
            repository,
            registry,
            settings,
        }
    }

    /// Validates the match, queues its current state as the first frame and
    /// registers the viewer. Nothing stays registered when the match is
    /// unknown or is deleted before registration completes.
    pub async fn open(&self, match_id: &str) -> Result<Subscription, FeedError> {
        let record = self
            .repository
            .find(match_id)
            .await
            .map_err(|e| {
                error!(match_id, error = %e, "match lookup failed");
                FeedError::StorageFailure
            })?
            .ok_or_else(|| FeedError::MatchNotFound {
                match_id: match_id.to_string(),
            })?;

        let initial = encode_event(&MatchEvent::ScoreUpdate { snapshot: record }).map_err(|e| {
            error!(match_id, error = %e, "failed to serialize initial match state");
            FeedError::Encoding
        })?;

        let (tx, rx) = mpsc::channel(self.settings.subscriber_buffer.max(1));
        let handle = SubscriberHandle::new(next_subscriber_id(), tx);
        let mut subscription = Subscription {
            match_id: Arc::from(match_id),
            subscriber_id: handle.id(),
            registry: self.registry.clone(),
            rx,
            heartbeat_interval: self.settings.heartbeat_interval,
            state: ConnectionState::Connecting,
        };

        // A fresh channel always has room for the initial frame.
        let queued = handle.try_write(&initial);
        debug_assert!(queued, "initial frame must fit an empty buffer");
        self.registry.register(match_id, handle);
        subscription.state = ConnectionState::Open;

        // A delete that landed during the lookup has already evicted, so check
        // again. Dropping the subscription deregisters it.
        match self.repository.find(match_id).await {
            Ok(Some(_)) => Ok(subscription),
            Ok(None) => {
                info!(match_id, "match deleted while stream was opening");
                Err(FeedError::MatchNotFound {
                    match_id: match_id.to_string(),
                })
            }
            Err(e) => {
                error!(match_id, error = %e, "match lookup failed");
                Err(FeedError::StorageFailure)
            }
        }
    }
}

/// A registered viewer connection.
///
/// Dropping the subscription closes it: the keepalive timer stops with the
/// stream and the viewer is deregistered exactly once.
#[derive(Debug)]
pub struct Subscription {
    match_id: Arc<str>,
    subscriber_id: SubscriberId,
    registry: Arc<SubscriberRegistry>,
    rx: mpsc::Receiver<Arc<str>>,
    heartbeat_interval: Duration,
    state: ConnectionState,
}

impl Subscription {
    pub fn subscriber_id(&self) -> SubscriberId {
        self.subscriber_id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Next event payload, or None once the registry dropped this viewer.
    pub async fn recv(&mut self) -> Option<Arc<str>> {
        if self.state == ConnectionState::Closed {
            return None;
        }
        let payload = self.rx.recv().await;
        if payload.is_none() {
            debug!(match_id = %self.match_id, subscriber_id = self.subscriber_id, "stream ended by server");
            self.close();
        }
        payload
    }

    /// Stops further writes and deregisters. Safe to call more than once.
    pub fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.state = ConnectionState::Closed;
        // Pending and future writes fail, so the dispatcher sees a dead viewer.
        self.rx.close();
        self.registry.deregister(&self.match_id, self.subscriber_id);
        info!(match_id = %self.match_id, subscriber_id = self.subscriber_id, "viewer disconnected");
    }

    /// Turns the subscription into a frame stream with an interleaved
    /// keepalive. The heartbeat timer lives inside the stream.
    pub fn into_frames(self) -> impl Stream<Item = StreamFrame> + Send + 'static {
        let period = self.heartbeat_interval;
        let mut heartbeat = tokio::time::interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        futures::stream::unfold((self, heartbeat), |(mut subscription, mut heartbeat)| async move {
            tokio::select! {
                biased;
                payload = subscription.recv() => {
                    payload.map(|payload| (StreamFrame::Data(payload), (subscription, heartbeat)))
                }
                _ = heartbeat.tick() => Some((StreamFrame::Heartbeat, (subscription, heartbeat))),
            }
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}
