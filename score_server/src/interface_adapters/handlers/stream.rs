use crate::interface_adapters::http::map_feed_error;
use crate::interface_adapters::state::AppState;
use crate::use_cases::StreamFrame;
use axum::{
    extract::{Path, State},
    http::header,
    response::{
        IntoResponse, Response,
        sse::{Event, Sse},
    },
};
use futures::StreamExt;
use std::convert::Infallible;
use tracing::info;

// SSE endpoint: pushes the current match state, then every update, with a
// comment heartbeat in between.
pub async fn stream_match(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Response {
    // Unknown matches get an ordinary JSON error before any stream framing.
    let subscription = match state.feed.open_stream(&match_id).await {
        Ok(subscription) => subscription,
        Err(err) => return map_feed_error(err).into_response(),
    };

    info!(
        match_id = %match_id,
        subscriber_id = subscription.subscriber_id(),
        viewers = state.feed.subscriber_count(&match_id),
        "viewer connected"
    );

    let events = subscription.into_frames().map(|frame| {
        let event = match frame {
            StreamFrame::Data(payload) => Event::default().data(payload),
            StreamFrame::Heartbeat => Event::default().comment("heartbeat"),
        };
        Ok::<_, Infallible>(event)
    });

    (
        [
            (header::CACHE_CONTROL, "no-cache"),
            (header::CONNECTION, "keep-alive"),
        ],
        Sse::new(events),
    )
        .into_response()
}
