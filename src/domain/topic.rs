//! Named pub/sub topics with at-least-once delivery.
//!
//! A [`Topic`] wraps a [`tokio::sync::broadcast`] channel. Every published
//! message is first appended to the durable message log (when one is
//! configured), and the log row id becomes the message id. The message is
//! then fanned out to all live subscribers. Subscribers that reconnect use
//! [`Topic::replay_after`] to catch up, so a message may be seen more than
//! once.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::PlaceError;
use crate::persistence::MessageLog;

/// Name of the topic that announces newly created places.
pub const PLACE_ADDED_TOPIC: &str = "place-added";

/// Identifier assigned to a message when the topic acknowledges it.
pub type MessageId = i64;

/// A message as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery<T> {
    /// Topic the message was published to.
    pub topic: String,
    /// Acknowledgement id. Increases with publish order within a topic.
    pub message_id: MessageId,
    /// Published payload.
    pub payload: T,
}

/// Sends messages of type `T` to a topic.
///
/// `publish` returns once the topic has acknowledged the message.
#[async_trait]
pub trait Publisher<T>: fmt::Debug + Send + Sync {
    /// Name of the topic this publisher writes to.
    fn topic(&self) -> &str;

    /// Publishes `message` and returns its acknowledgement id.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Publish`] if the topic rejects the message.
    async fn publish(&self, message: &T) -> Result<MessageId, PlaceError>;
}

/// Broadcast topic for messages of type `T`.
///
/// Cloning a `Topic` yields another handle to the same channel and log.
#[derive(Debug, Clone)]
pub struct Topic<T> {
    name: String,
    sender: broadcast::Sender<Delivery<T>>,
    log: Option<Arc<dyn MessageLog>>,
    last_id: Arc<AtomicI64>,
}

impl<T> Topic<T>
where
    T: Clone + Serialize,
{
    /// Creates an in-process topic with the given channel capacity.
    ///
    /// Message ids are assigned from an in-memory counter and nothing is
    /// kept for replay.
    #[must_use]
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            name: name.into(),
            sender,
            log: None,
            last_id: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Creates a topic whose messages are appended to `log` before fan-out.
    #[must_use]
    pub fn with_log(name: impl Into<String>, capacity: usize, log: Arc<dyn MessageLog>) -> Self {
        Self {
            log: Some(log),
            ..Self::new(name, capacity)
        }
    }

    /// Returns the topic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a receiver for all future deliveries.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Delivery<T>> {
        self.sender.subscribe()
    }

    /// Returns `true` if published messages are kept for replay.
    #[must_use]
    pub fn has_log(&self) -> bool {
        self.log.is_some()
    }

    /// Returns the highest message id handed out so far, `0` before the
    /// first publish.
    #[must_use]
    pub fn last_message_id(&self) -> MessageId {
        self.last_id.load(Ordering::Relaxed)
    }

    /// Returns the current number of live subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Appends the message to the log (if any) and broadcasts it.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Publish`] if the message cannot be encoded or
    /// the log rejects it.
    pub async fn send(&self, message: &T) -> Result<MessageId, PlaceError> {
        let message_id = match &self.log {
            Some(log) => {
                let payload =
                    serde_json::to_value(message).map_err(|e| self.publish_error(&e))?;
                let id = log
                    .append(&self.name, &payload)
                    .await
                    .map_err(|e| self.publish_error(&e))?;
                self.last_id.fetch_max(id, Ordering::Relaxed);
                id
            }
            None => self.last_id.fetch_add(1, Ordering::Relaxed) + 1,
        };

        let receivers = self
            .sender
            .send(Delivery {
                topic: self.name.clone(),
                message_id,
                payload: message.clone(),
            })
            .unwrap_or(0);

        tracing::debug!(topic = %self.name, message_id, receivers, "message published");
        Ok(message_id)
    }

    fn publish_error(&self, reason: &dyn fmt::Display) -> PlaceError {
        PlaceError::Publish {
            topic: self.name.clone(),
            reason: reason.to_string(),
        }
    }
}

impl<T> Topic<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Returns logged deliveries with an id greater than `after`, oldest
    /// first. Empty when the topic has no log.
    ///
    /// Rows whose payload no longer decodes as `T` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] if the log cannot be read.
    pub async fn replay_after(&self, after: MessageId) -> Result<Vec<Delivery<T>>, PlaceError> {
        let Some(log) = &self.log else {
            return Ok(Vec::new());
        };

        let stored = log.load_after(&self.name, after).await?;
        let mut deliveries = Vec::with_capacity(stored.len());
        for message in stored {
            match serde_json::from_value(message.payload) {
                Ok(payload) => deliveries.push(Delivery {
                    topic: message.topic,
                    message_id: message.id,
                    payload,
                }),
                Err(e) => {
                    tracing::warn!(topic = %self.name, message_id = message.id, error = %e, "skipping undecodable message");
                }
            }
        }
        Ok(deliveries)
    }
}

#[async_trait]
impl<T> Publisher<T> for Topic<T>
where
    T: Clone + Serialize + fmt::Debug + Send + Sync + 'static,
{
    fn topic(&self) -> &str {
        self.name()
    }

    async fn publish(&self, message: &T) -> Result<MessageId, PlaceError> {
        self.send(message).await
    }
}
