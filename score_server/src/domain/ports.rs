use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::Match;

// Port for match record storage. Errors are opaque strings; callers map them
// to a storage failure.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn find(&self, match_id: &str) -> Result<Option<Match>, String>;
    async fn list(&self) -> Result<Vec<Match>, String>;
    async fn insert(&self, record: Match) -> Result<Match, String>;
    // Replaces an existing record; returns None if the id is unknown.
    async fn update(&self, record: Match) -> Result<Option<Match>, String>;
    async fn remove(&self, match_id: &str) -> Result<bool, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
