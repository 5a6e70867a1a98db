use std::fmt;

// Errors raised while opening a live stream for a match.
#[derive(Debug, PartialEq, Eq)]
pub enum FeedError {
    MatchNotFound { match_id: String },
    StorageFailure,
    Encoding,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::MatchNotFound { match_id } => write!(f, "match {match_id} not found"),
            FeedError::StorageFailure => write!(f, "match storage unavailable"),
            FeedError::Encoding => write!(f, "failed to encode match state"),
        }
    }
}

impl std::error::Error for FeedError {}

// Errors raised by match administration workflows.
#[derive(Debug, PartialEq, Eq)]
pub enum MatchError {
    NotFound,
    InvalidInput(&'static str),
    StorageFailure,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NotFound => write!(f, "match not found"),
            MatchError::InvalidInput(reason) => write!(f, "{reason}"),
            MatchError::StorageFailure => write!(f, "storage error"),
        }
    }
}

impl std::error::Error for MatchError {}
