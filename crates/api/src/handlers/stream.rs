//! # Live Update Stream
//!
//! Server-Sent Events endpoint delivering broadcast messages to connected
//! clients. Subscribers may scope their stream to one class or one faculty
//! member via query parameters; unscoped subscribers receive everything.
//!
//! Delivery is best-effort. A subscriber that falls behind the channel
//! capacity skips the missed messages and should re-fetch current state via
//! the pull endpoints.

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use serde::Deserialize;
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::ApiState;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Restrict the stream to updates affecting this class.
    pub class_id: Option<String>,

    /// Restrict the stream to updates affecting this faculty member.
    pub faculty_id: Option<Uuid>,
}

#[axum::debug_handler]
pub async fn subscribe(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<StreamQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.broadcaster.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(message) => {
                    if !message.matches(query.class_id.as_deref(), query.faculty_id) {
                        continue;
                    }
                    let data = serde_json::to_string(&message).unwrap_or_default();
                    yield Ok(Event::default().event(message.name()).data(data));
                }
                Err(RecvError::Lagged(skipped)) => {
                    // No replay: the client refreshes via a pull request.
                    tracing::debug!("Stream subscriber lagged, skipped {} messages", skipped);
                    continue;
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
