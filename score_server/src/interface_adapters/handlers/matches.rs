use crate::domain::Match;
use crate::interface_adapters::http::{ApiError, map_match_error};
use crate::interface_adapters::protocol::{
    AddGoalRequest, CreateMatchRequest, UpdateScoreRequest, ViewerCountResponse,
};
use crate::interface_adapters::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

pub async fn list_matches(State(state): State<AppState>) -> Result<Json<Vec<Match>>, ApiError> {
    let matches = state.match_admin().list().await.map_err(map_match_error)?;
    Ok(Json(matches))
}

pub async fn get_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let record = state
        .match_admin()
        .get(&match_id)
        .await
        .map_err(map_match_error)?;
    Ok(Json(record))
}

pub async fn create_match(
    State(state): State<AppState>,
    Json(payload): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let created = state
        .match_admin()
        .create(payload.into())
        .await
        .map_err(map_match_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .match_admin()
        .delete(&match_id)
        .await
        .map_err(map_match_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// Admin: overwrite the score and notify viewers.
pub async fn update_score(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(payload): Json<UpdateScoreRequest>,
) -> Result<Json<Match>, ApiError> {
    let updated = state
        .match_admin()
        .update_score(&match_id, payload.home_score, payload.away_score)
        .await
        .map_err(map_match_error)?;
    Ok(Json(updated))
}

// Admin: record a goal and notify viewers.
pub async fn add_goal(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Json(payload): Json<AddGoalRequest>,
) -> Result<Json<Match>, ApiError> {
    let updated = state
        .match_admin()
        .add_goal(&match_id, payload.into())
        .await
        .map_err(map_match_error)?;
    Ok(Json(updated))
}

// Admin: finish the match and notify viewers.
pub async fn end_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    let updated = state
        .match_admin()
        .end_match(&match_id)
        .await
        .map_err(map_match_error)?;
    Ok(Json(updated))
}

pub async fn viewer_count(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Json<ViewerCountResponse> {
    let viewers = state.feed.subscriber_count(&match_id);
    Json(ViewerCountResponse { match_id, viewers })
}
