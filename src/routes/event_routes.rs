//! Stream de invalidación de vistas (Server-Sent Events)

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::cache::ViewInvalidated;
use crate::state::AppState;

/// Nombre del evento SSE enviado a la UI
const EVENT_NAME: &str = "invalidated";

pub fn create_event_router() -> Router<AppState> {
    Router::new().route("/", get(stream_events))
}

fn to_event(event: &ViewInvalidated) -> Event {
    Event::default()
        .event(EVENT_NAME)
        .data(event.view.as_str())
        .id(event.at.timestamp_millis().to_string())
}

async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("📡 Nuevo suscriptor de eventos");
    let receiver = state.views.subscribe();

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => return Some((Ok(to_event(&event)), receiver)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("⚠️ Suscriptor atrasado, {} eventos descartados", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
