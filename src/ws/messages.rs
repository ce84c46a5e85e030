//! WebSocket message types sent to subscribers.

use serde::{Deserialize, Serialize};

use crate::domain::{Delivery, Place};

/// Query parameters accepted by `GET /ws`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeParams {
    /// Replay logged messages with an id greater than this one.
    pub after: Option<i64>,
}

/// Server → client frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A `place-added` message.
    Delivery(Delivery<Place>),
    /// Something went wrong on the server side of the stream.
    Error {
        /// Numeric code, HTTP-like.
        code: u16,
        /// Human-readable message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PLACE_ADDED_TOPIC, PlaceId};

    #[test]
    fn delivery_frame_is_flat_and_tagged() {
        let frame = ServerMessage::Delivery(Delivery {
            topic: PLACE_ADDED_TOPIC.to_string(),
            message_id: 4,
            payload: Place {
                id: PlaceId::new(2),
                address: "12 Main St".to_string(),
                name: "Cafe Roma".to_string(),
            },
        });
        let json = serde_json::to_value(&frame).unwrap_or_default();
        assert_eq!(json["type"], "delivery");
        assert_eq!(json["topic"], "place-added");
        assert_eq!(json["message_id"], 4);
        assert_eq!(json["payload"]["name"], "Cafe Roma");
    }

    #[test]
    fn error_frame_shape() {
        let frame = ServerMessage::Error {
            code: 503,
            message: "replay unavailable".to_string(),
        };
        let json = serde_json::to_value(&frame).unwrap_or_default();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], 503);
    }
}
