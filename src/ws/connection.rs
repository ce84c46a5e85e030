//! WebSocket connection loop.
//!
//! Sends the replayed backlog, then forwards live deliveries until the
//! client goes away or the topic closes. A subscriber that falls behind the
//! broadcast channel is caught up from the topic's message log.

use axum::extract::ws::{Message, WebSocket};
use axum::http::StatusCode;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::ServerMessage;
use crate::domain::{Delivery, MessageId, Place, Topic};

/// Where a connection's stream begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// Replay logged messages with an id greater than this one, then go
    /// live.
    After(MessageId),
    /// Go live straight away. Holds the last id published before the
    /// subscription was taken.
    Live(MessageId),
}

/// Runs the read/write loop for a single WebSocket connection.
///
/// `live` must be subscribed before `resume` is computed so that nothing
/// published in between is missed. Live deliveries that overlap a replay
/// are forwarded again.
pub async fn run_connection(
    socket: WebSocket,
    topic: Topic<Place>,
    mut live: broadcast::Receiver<Delivery<Place>>,
    resume: Resume,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let mut cursor = match resume {
        Resume::After(after) => match catch_up(&mut ws_tx, &topic, after).await {
            Ok(cursor) => cursor,
            Err(_) => return,
        },
        Resume::Live(last) => last,
    };

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    // read-only stream
                    Some(Ok(_)) => {}
                }
            }
            delivery = live.recv() => {
                match delivery {
                    Ok(delivery) => {
                        cursor = cursor.max(delivery.message_id);
                        if send(&mut ws_tx, &ServerMessage::Delivery(delivery)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, cursor, "ws subscriber lagged behind topic");
                        let resumed = if topic.has_log() {
                            catch_up(&mut ws_tx, &topic, cursor).await
                        } else {
                            let frame = ServerMessage::Error {
                                code: StatusCode::GONE.as_u16(),
                                message: format!("{missed} messages after id {cursor} were dropped"),
                            };
                            send(&mut ws_tx, &frame).await.map(|()| cursor)
                        };
                        match resumed {
                            Ok(next) => cursor = next,
                            Err(_) => break,
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Forwards logged messages after `after` and returns the highest id sent.
///
/// A failed replay is reported to the client as an error frame and the
/// cursor stays at `after`.
async fn catch_up(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    topic: &Topic<Place>,
    after: MessageId,
) -> Result<MessageId, axum::Error> {
    match topic.replay_after(after).await {
        Ok(backlog) => {
            let mut cursor = after;
            for delivery in backlog {
                cursor = cursor.max(delivery.message_id);
                send(ws_tx, &ServerMessage::Delivery(delivery)).await?;
            }
            Ok(cursor)
        }
        Err(e) => {
            tracing::warn!(error = %e, after, "replay failed, continuing with live deliveries");
            let frame = ServerMessage::Error {
                code: e.status_code().as_u16(),
                message: e.to_string(),
            };
            send(ws_tx, &frame).await?;
            Ok(after)
        }
    }
}

async fn send(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    frame: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(frame) {
        Ok(json) => ws_tx.send(Message::text(json)).await,
        Err(e) => {
            tracing::error!(error = %e, "failed to encode ws frame");
            Ok(())
        }
    }
}
