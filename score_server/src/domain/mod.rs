// Domain layer: match records, feed events, and the ports the core depends on.

pub mod entities;
pub mod errors;
pub mod events;
pub mod ports;

pub use entities::{Goal, Match, MatchStatus, Team};
pub use errors::{FeedError, MatchError};
pub use events::MatchEvent;
