use crate::interface_adapters::protocol::HealthResponse;
use crate::interface_adapters::state::AppState;
use axum::{Json, extract::State};

// Liveness check that also reports how many streams are open.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "Live score server is running",
        subscribers: state.feed.total_subscribers(),
    })
}
