// Wire DTOs for the public HTTP API. Feed events are serialized straight from
// the domain `MatchEvent`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{MatchStatus, Team};
use crate::use_cases::{NewGoal, NewMatch};

/// Body of `PUT /api/matches/{id}/score`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    pub home_score: u32,
    pub away_score: u32,
}

/// Body of `POST /api/matches/{id}/goals`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGoalRequest {
    pub scorer: String,
    pub minute: u32,
    pub team: Team,
}

impl From<AddGoalRequest> for NewGoal {
    fn from(request: AddGoalRequest) -> Self {
        Self {
            scorer: request.scorer,
            minute: request.minute,
            team: request.team,
        }
    }
}

/// Body of `POST /api/matches`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

impl From<CreateMatchRequest> for NewMatch {
    fn from(request: CreateMatchRequest) -> Self {
        Self {
            home_team: request.home_team,
            away_team: request.away_team,
            status: request.status,
            start_time: request.start_time,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerCountResponse {
    pub match_id: String,
    pub viewers: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    // Open streams across all matches.
    pub subscribers: usize,
}
