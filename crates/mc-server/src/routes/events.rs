use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;

use crate::state::AppState;

/// GET /api/events: SSE stream of `update` events. Each event's data names
/// the file that changed (`config`, `tasks`, `content`, `proposals`, `actions`).
pub async fn sse_events(State(app): State<AppState>) -> impl axum::response::IntoResponse {
    let rx = app.event_tx.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| {
        msg.ok()
            .map(|name| Ok::<Event, Infallible>(Event::default().event("update").data(name)))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
