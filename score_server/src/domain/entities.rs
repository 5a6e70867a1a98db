use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::MatchError;

/// Lifecycle status of a match as shown to viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Finished,
}

/// Side of the pitch a goal is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Home,
    Away,
}

/// A single goal recorded against a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub scorer: String,
    pub minute: u32,
    pub team: Team,
    pub timestamp: DateTime<Utc>,
}

/// Full snapshot of a match; every feed event carries one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub status: MatchStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Match {
    /// Appends a goal and credits the scoring side.
    ///
    /// Leaves the match untouched when the side's score is already at its
    /// maximum.
    pub fn record_goal(&mut self, goal: Goal) -> Result<(), MatchError> {
        let score = match goal.team {
            Team::Home => &mut self.home_score,
            Team::Away => &mut self.away_score,
        };
        *score = score
            .checked_add(1)
            .ok_or(MatchError::InvalidInput("score out of range"))?;
        self.goals.push(goal);
        Ok(())
    }

    // Overwrite both scores; goals are left untouched (admin correction path).
    pub fn set_score(&mut self, home_score: u32, away_score: u32) {
        self.home_score = home_score;
        self.away_score = away_score;
    }

    pub fn finish(&mut self) {
        self.status = MatchStatus::Finished;
    }
}
