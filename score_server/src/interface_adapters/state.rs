use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::ports::{Clock, MatchRepository};
use crate::use_cases::{MatchAdmin, MatchFeed};

// Application state shared by every route.
#[derive(Clone)]
pub struct AppState {
    // Match record storage.
    pub repository: Arc<dyn MatchRepository>,
    // Live feed core: subscriber registry, dispatcher, stream lifecycle.
    pub feed: Arc<MatchFeed>,
    // Serializes match mutations so feed events follow state order.
    pub write_gate: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(repository: Arc<dyn MatchRepository>, feed: Arc<MatchFeed>) -> Self {
        Self {
            repository,
            feed,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn match_admin(&self) -> MatchAdmin<SystemClock> {
        MatchAdmin {
            repository: self.repository.clone(),
            feed: self.feed.clone(),
            clock: SystemClock,
            write_gate: self.write_gate.clone(),
        }
    }
}

// System clock adapter used by match workflows.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
