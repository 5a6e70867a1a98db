// Shared HTTP response types for consistent API error payloads.

use axum::{Json, http::StatusCode};

use crate::domain::{FeedError, MatchError};

#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

// Helper to build a JSON error response.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn map_match_error(err: MatchError) -> ApiError {
    match err {
        MatchError::NotFound => error_response(StatusCode::NOT_FOUND, "Match not found"),
        MatchError::InvalidInput(reason) => error_response(StatusCode::BAD_REQUEST, reason),
        MatchError::StorageFailure => error_response(StatusCode::BAD_GATEWAY, "storage error"),
    }
}

// Stream setup failures are reported before any event framing is sent.
pub fn map_feed_error(err: FeedError) -> ApiError {
    match err {
        FeedError::MatchNotFound { .. } => error_response(StatusCode::NOT_FOUND, "Match not found"),
        FeedError::StorageFailure => error_response(StatusCode::BAD_GATEWAY, "storage error"),
        FeedError::Encoding => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to encode match state")
        }
    }
}
