use crate::interface_adapters::handlers::health::health;
use crate::interface_adapters::handlers::matches::{
    add_goal, create_match, delete_match, end_match, get_match, list_matches, update_score,
    viewer_count,
};
use crate::interface_adapters::handlers::stream::stream_match;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/matches", get(list_matches).post(create_match))
        .route("/api/matches/{id}", get(get_match).delete(delete_match))
        .route("/api/matches/{id}/stream", get(stream_match))
        .route("/api/matches/{id}/viewers", get(viewer_count))
        .route("/api/matches/{id}/score", put(update_score))
        .route("/api/matches/{id}/goals", post(add_goal))
        .route("/api/matches/{id}/end", put(end_match))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
