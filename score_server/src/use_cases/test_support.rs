use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use crate::domain::ports::{Clock, MatchRepository};
use crate::domain::{Goal, Match, MatchEvent, MatchStatus, Team};

pub(crate) type MatchTable = Arc<Mutex<BTreeMap<String, Match>>>;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl FixedClock {
    pub(crate) fn at(epoch_seconds: i64) -> Self {
        Self(DateTime::from_timestamp(epoch_seconds, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn sample_match(id: &str) -> Match {
    Match {
        id: id.to_string(),
        home_team: "Bayern Munich".to_string(),
        away_team: "Borussia Dortmund".to_string(),
        home_score: 0,
        away_score: 0,
        status: MatchStatus::Live,
        start_time: DateTime::<Utc>::UNIX_EPOCH,
        goals: Vec::new(),
    }
}

pub(crate) fn goal_event(mut snapshot: Match) -> MatchEvent {
    let goal = Goal {
        id: "goal-1".to_string(),
        scorer: "Musiala".to_string(),
        minute: 35,
        team: Team::Home,
        timestamp: DateTime::<Utc>::UNIX_EPOCH,
    };
    snapshot
        .record_goal(goal.clone())
        .expect("expected fixture goal to fit the score");
    MatchEvent::Goal { snapshot, goal }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub find: bool,
    pub list: bool,
    pub insert: bool,
    pub update: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingRepository {
    matches: MatchTable,
    failures: FailureFlags,
}

impl RecordingRepository {
    pub(crate) fn new() -> Self {
        Self {
            matches: Arc::new(Mutex::new(BTreeMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_matches(records: impl IntoIterator<Item = Match>) -> Self {
        let repository = Self::new();
        for record in records {
            repository.insert_test_match(record);
        }
        repository
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_match(&self, record: Match) {
        let mut guard = self.matches.lock().expect("matches mutex poisoned");
        guard.insert(record.id.clone(), record);
    }

    pub(crate) fn get_test_match(&self, match_id: &str) -> Option<Match> {
        let guard = self.matches.lock().expect("matches mutex poisoned");
        guard.get(match_id).cloned()
    }
}

#[async_trait]
impl MatchRepository for RecordingRepository {
    async fn find(&self, match_id: &str) -> Result<Option<Match>, String> {
        if self.failures.find {
            return Err("find failed".to_string());
        }

        let guard = self.matches.lock().expect("matches mutex poisoned");
        Ok(guard.get(match_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Match>, String> {
        if self.failures.list {
            return Err("list failed".to_string());
        }

        let guard = self.matches.lock().expect("matches mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    async fn insert(&self, record: Match) -> Result<Match, String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.matches.lock().expect("matches mutex poisoned");
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, record: Match) -> Result<Option<Match>, String> {
        if self.failures.update {
            return Err("update failed".to_string());
        }

        let mut guard = self.matches.lock().expect("matches mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, match_id: &str) -> Result<bool, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.matches.lock().expect("matches mutex poisoned");
        Ok(guard.remove(match_id).is_some())
    }
}

// Holds the first `find` after it has read the record, until released.
// Lets a test interleave another operation inside a lookup's await.
pub(crate) struct HeldLookupRepository {
    inner: RecordingRepository,
    held: AtomicBool,
    pub(crate) reached: Arc<Notify>,
    pub(crate) release: Arc<Notify>,
}

impl HeldLookupRepository {
    pub(crate) fn new(inner: RecordingRepository) -> Self {
        Self {
            inner,
            held: AtomicBool::new(false),
            reached: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl MatchRepository for HeldLookupRepository {
    async fn find(&self, match_id: &str) -> Result<Option<Match>, String> {
        let result = self.inner.find(match_id).await;
        if !self.held.swap(true, Ordering::SeqCst) {
            self.reached.notify_one();
            self.release.notified().await;
        }
        result
    }

    async fn list(&self) -> Result<Vec<Match>, String> {
        self.inner.list().await
    }

    async fn insert(&self, record: Match) -> Result<Match, String> {
        self.inner.insert(record).await
    }

    async fn update(&self, record: Match) -> Result<Option<Match>, String> {
        self.inner.update(record).await
    }

    async fn remove(&self, match_id: &str) -> Result<bool, String> {
        self.inner.remove(match_id).await
    }
}
