// In-memory match storage adapter.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::MatchRepository;
use crate::domain::{Goal, Match, MatchStatus, Team};

#[derive(Clone, Default)]
pub struct InMemoryMatchRepository {
    pub matches: Arc<RwLock<BTreeMap<String, Match>>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // Repository preloaded with a few live fixtures for demos and local runs.
    pub fn with_sample_matches(now: DateTime<Utc>) -> Self {
        let matches = sample_matches(now)
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            matches: Arc::new(RwLock::new(matches)),
        }
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn find(&self, match_id: &str) -> Result<Option<Match>, String> {
        let matches = self.matches.read().await;
        Ok(matches.get(match_id).cloned())
    }

    async fn list(&self) -> Result<Vec<Match>, String> {
        let matches = self.matches.read().await;
        Ok(matches.values().cloned().collect())
    }

    async fn insert(&self, record: Match) -> Result<Match, String> {
        let mut matches = self.matches.write().await;
        matches.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, record: Match) -> Result<Option<Match>, String> {
        let mut matches = self.matches.write().await;
        let Some(slot) = matches.get_mut(&record.id) else {
            return Ok(None);
        };
        *slot = record.clone();
        Ok(Some(record))
    }

    async fn remove(&self, match_id: &str) -> Result<bool, String> {
        let mut matches = self.matches.write().await;
        Ok(matches.remove(match_id).is_some())
    }
}

fn goal(id: &str, scorer: &str, minute: u32, team: Team, now: DateTime<Utc>) -> Goal {
    Goal {
        id: id.to_string(),
        scorer: scorer.to_string(),
        minute,
        team,
        timestamp: now,
    }
}

fn fixture(id: &str, home: &str, away: &str, goals: Vec<Goal>, now: DateTime<Utc>) -> Match {
    let scored = |team: Team| goals.iter().filter(|goal| goal.team == team).count() as u32;
    let (home_score, away_score) = (scored(Team::Home), scored(Team::Away));
    Match {
        id: id.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_score,
        away_score,
        status: MatchStatus::Live,
        start_time: now,
        goals,
    }
}

fn sample_matches(now: DateTime<Utc>) -> Vec<Match> {
    vec![
        fixture("1", "Manchester United", "Liverpool", Vec::new(), now),
        fixture(
            "2",
            "Barcelona",
            "Real Madrid",
            vec![
                goal("1", "Lewandowski", 15, Team::Home, now),
                goal("2", "Vinicius Jr", 28, Team::Away, now),
            ],
            now,
        ),
        fixture(
            "3",
            "Bayern Munich",
            "Borussia Dortmund",
            vec![
                goal("3", "Kane", 10, Team::Home, now),
                goal("4", "Musiala", 35, Team::Home, now),
            ],
            now,
        ),
    ]
}
