//! Axum WebSocket upgrade handler.

use axum::extract::rejection::QueryRejection;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::response::IntoResponse;

use super::connection::{Resume, run_connection};
use super::messages::SubscribeParams;
use crate::app_state::AppState;
use crate::error::PlaceError;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// The live receiver is created before the resume point is taken, so no
/// message published in between is missed.
///
/// # Errors
///
/// Returns [`PlaceError::Validation`] if `after` is not an integer.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    params: Result<Query<SubscribeParams>, QueryRejection>,
) -> Result<impl IntoResponse, PlaceError> {
    let Query(params) = params?;
    let topic = state.place_added;
    let live = topic.subscribe();
    let resume = match params.after {
        Some(after) => Resume::After(after),
        None => Resume::Live(topic.last_message_id()),
    };

    Ok(ws.on_upgrade(move |socket| run_connection(socket, topic, live, resume)))
}
