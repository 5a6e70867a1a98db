use serde::Serialize;

use crate::domain::entities::{Goal, Match};

/// Update pushed to every viewer of a match.
///
/// Each variant carries the full match snapshot so a client can always
/// render from the latest event alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    ScoreUpdate {
        #[serde(rename = "match")]
        snapshot: Match,
    },
    Goal {
        #[serde(rename = "match")]
        snapshot: Match,
        goal: Goal,
    },
    MatchEnd {
        #[serde(rename = "match")]
        snapshot: Match,
    },
}

impl MatchEvent {
    /// Wire name of the event kind, used for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchEvent::ScoreUpdate { .. } => "score_update",
            MatchEvent::Goal { .. } => "goal",
            MatchEvent::MatchEnd { .. } => "match_end",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MatchStatus, Team};
    use chrono::{DateTime, Utc};
    use serde_json::Value;

    fn snapshot() -> Match {
        Match {
            id: "2".to_string(),
            home_team: "Barcelona".to_string(),
            away_team: "Real Madrid".to_string(),
            home_score: 1,
            away_score: 0,
            status: MatchStatus::Live,
            start_time: DateTime::<Utc>::UNIX_EPOCH,
            goals: Vec::new(),
        }
    }

    #[test]
    fn when_goal_event_is_serialized_then_type_match_and_goal_are_top_level() {
        let goal = Goal {
            id: "g-1".to_string(),
            scorer: "Lewandowski".to_string(),
            minute: 15,
            team: Team::Home,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
        };
        let event = MatchEvent::Goal {
            snapshot: snapshot(),
            goal,
        };

        let value: Value = serde_json::to_value(&event).expect("expected event to serialize");

        assert_eq!(value["type"], "goal");
        assert_eq!(value["match"]["id"], "2");
        assert_eq!(value["match"]["homeScore"], 1);
        assert_eq!(value["goal"]["scorer"], "Lewandowski");
        assert_eq!(value["goal"]["team"], "home");
    }

    #[test]
    fn when_score_update_is_serialized_then_goal_key_is_absent() {
        let event = MatchEvent::ScoreUpdate {
            snapshot: snapshot(),
        };

        let value: Value = serde_json::to_value(&event).expect("expected event to serialize");

        assert_eq!(value["type"], "score_update");
        assert!(value.get("goal").is_none());
        assert_eq!(value["match"]["id"], "2");
    }

    #[test]
    fn when_match_end_is_serialized_then_type_is_snake_case() {
        let mut finished = snapshot();
        finished.finish();
        let event = MatchEvent::MatchEnd { snapshot: finished };

        let value: Value = serde_json::to_value(&event).expect("expected event to serialize");

        assert_eq!(value["type"], "match_end");
        assert_eq!(value["match"]["status"], "finished");
        assert_eq!(event.kind(), "match_end");
    }
}
