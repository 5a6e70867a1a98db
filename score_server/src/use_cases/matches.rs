// Match administration workflows that mutate records and publish feed events.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::domain::ports::{Clock, MatchRepository};
use crate::domain::{Goal, Match, MatchError, MatchEvent, MatchStatus, Team};
use crate::use_cases::feed::MatchFeed;
use crate::use_cases::ids::next_record_id;

// Input for creating a match record.
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub home_team: String,
    pub away_team: String,
    pub status: Option<MatchStatus>,
    pub start_time: Option<DateTime<Utc>>,
}

// Input for recording a goal.
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub scorer: String,
    pub minute: u32,
    pub team: Team,
}

// Match admin use case with injected dependencies.
pub struct MatchAdmin<C> {
    pub repository: Arc<dyn MatchRepository>,
    pub feed: Arc<MatchFeed>,
    pub clock: C,
    // Serializes read-modify-write cycles so broadcasts follow state order.
    pub write_gate: Arc<Mutex<()>>,
}

impl<C> MatchAdmin<C>
where
    C: Clock,
{
    pub async fn list(&self) -> Result<Vec<Match>, MatchError> {
        self.repository.list().await.map_err(storage_failure)
    }

    pub async fn get(&self, match_id: &str) -> Result<Match, MatchError> {
        self.repository
            .find(match_id)
            .await
            .map_err(storage_failure)?
            .ok_or(MatchError::NotFound)
    }

    pub async fn create(&self, input: NewMatch) -> Result<Match, MatchError> {
        let home_team = input.home_team.trim();
        let away_team = input.away_team.trim();
        if home_team.is_empty() || away_team.is_empty() {
            return Err(MatchError::InvalidInput("homeTeam and awayTeam are required"));
        }

        let record = Match {
            id: next_record_id(),
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_score: 0,
            away_score: 0,
            status: input.status.unwrap_or(MatchStatus::Scheduled),
            start_time: input.start_time.unwrap_or_else(|| self.clock.now()),
            goals: Vec::new(),
        };

        let created = self.repository.insert(record).await.map_err(storage_failure)?;
        info!(match_id = %created.id, home = %created.home_team, away = %created.away_team, "match created");
        Ok(created)
    }

    /// Deletes a match and ends every stream watching it.
    pub async fn delete(&self, match_id: &str) -> Result<(), MatchError> {
        let _gate = self.write_gate.lock().await;
        let removed = self.repository.remove(match_id).await.map_err(storage_failure)?;
        if !removed {
            return Err(MatchError::NotFound);
        }

        let evicted = self.feed.evict_match(match_id);
        info!(match_id, evicted, "match deleted");
        Ok(())
    }

    /// Overwrites both scores and broadcasts a `score_update`.
    pub async fn update_score(
        &self,
        match_id: &str,
        home_score: u32,
        away_score: u32,
    ) -> Result<Match, MatchError> {
        let _gate = self.write_gate.lock().await;
        let mut record = self.get(match_id).await?;
        record.set_score(home_score, away_score);

        let updated = self.store(record).await?;
        self.feed.broadcast(
            match_id,
            &MatchEvent::ScoreUpdate {
                snapshot: updated.clone(),
            },
        );
        Ok(updated)
    }

    /// Appends a goal, credits the scoring side and broadcasts a `goal`.
    pub async fn add_goal(&self, match_id: &str, input: NewGoal) -> Result<Match, MatchError> {
        let scorer = input.scorer.trim();
        if scorer.is_empty() {
            return Err(MatchError::InvalidInput("scorer is required"));
        }

        let _gate = self.write_gate.lock().await;
        let mut record = self.get(match_id).await?;
        let goal = Goal {
            id: next_record_id(),
            scorer: scorer.to_string(),
            minute: input.minute,
            team: input.team,
            timestamp: self.clock.now(),
        };
        record.record_goal(goal.clone())?;

        let updated = self.store(record).await?;
        self.feed.broadcast(
            match_id,
            &MatchEvent::Goal {
                snapshot: updated.clone(),
                goal,
            },
        );
        Ok(updated)
    }

    /// Marks the match finished and broadcasts a `match_end`.
    pub async fn end_match(&self, match_id: &str) -> Result<Match, MatchError> {
        let _gate = self.write_gate.lock().await;
        let mut record = self.get(match_id).await?;
        record.finish();

        let updated = self.store(record).await?;
        self.feed.broadcast(
            match_id,
            &MatchEvent::MatchEnd {
                snapshot: updated.clone(),
            },
        );
        Ok(updated)
    }

    async fn store(&self, record: Match) -> Result<Match, MatchError> {
        self.repository
            .update(record)
            .await
            .map_err(storage_failure)?
            .ok_or(MatchError::NotFound)
    }
}

fn storage_failure(err: String) -> MatchError {
    error!(error = %err, "match repository failure");
    MatchError::StorageFailure
}
