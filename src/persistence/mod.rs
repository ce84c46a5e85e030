//! Persistence layer: the `places` table and the topic message log.
//!
//! [`PlaceStore`] is the seam between the service and storage, and
//! [`MessageLog`] the seam between a topic and its durable history. The
//! PostgreSQL implementations map each operation to one SQL statement; the
//! in-memory implementations back tests and runs with persistence disabled.

pub mod memory;
pub mod message_log;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{NewPlace, Place, PlaceId};
use crate::error::PlaceError;

pub use memory::{InMemoryMessageLog, InMemoryPlaceStore};
pub use message_log::PostgresMessageLog;
pub use models::StoredMessage;
pub use postgres::PostgresPlaceStore;

/// A window over the `places` table, ordered by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of rows to return.
    pub limit: u32,
    /// Number of rows to skip.
    pub offset: u32,
}

/// Storage operations on [`Place`] records.
///
/// Implementations are shared by all handlers and must be safe for
/// concurrent use without extra locking by the caller.
#[async_trait]
pub trait PlaceStore: fmt::Debug + Send + Sync {
    /// Inserts a new place and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] if the write fails.
    async fn create(&self, new_place: &NewPlace) -> Result<Place, PlaceError>;

    /// Loads a place by id.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::NotFound`] if no row matches, or
    /// [`PlaceError::Storage`] on read failure.
    async fn find_by_id(&self, id: PlaceId) -> Result<Place, PlaceError>;

    /// Removes a place by id. Succeeds when no row matches.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] if the delete fails.
    async fn delete_by_id(&self, id: PlaceId) -> Result<(), PlaceError>;

    /// Loads places. `None` returns every row in no particular order;
    /// `Some(page)` returns the requested window ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] on read failure. An empty table is
    /// not an error.
    async fn find_all(&self, page: Option<PageRequest>) -> Result<Vec<Place>, PlaceError>;
}

/// Append-only history of published topic messages.
///
/// The id returned by [`MessageLog::append`] is the message id subscribers
/// see, and ids increase in append order.
#[async_trait]
pub trait MessageLog: fmt::Debug + Send + Sync {
    /// Appends a message to `topic` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] if the write fails.
    async fn append(&self, topic: &str, payload: &serde_json::Value) -> Result<i64, PlaceError>;

    /// Loads messages of `topic` with an id greater than `after`, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] on read failure.
    async fn load_after(&self, topic: &str, after: i64) -> Result<Vec<StoredMessage>, PlaceError>;
}
