//! Place service: the four place operations and the place-added event.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{NewPlace, Place, PlaceId, Publisher};
use crate::error::PlaceError;
use crate::persistence::{PageRequest, PlaceStore};

/// Orchestration layer for place operations.
///
/// Holds the store and the place-added publisher it was constructed with.
/// Every store or publish call is bounded by the operation deadline; a
/// call that runs past it is abandoned and reported as
/// [`PlaceError::Cancelled`].
#[derive(Debug, Clone)]
pub struct PlaceService {
    store: Arc<dyn PlaceStore>,
    publisher: Arc<dyn Publisher<Place>>,
    deadline: Duration,
}

impl PlaceService {
    /// Creates a new `PlaceService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn PlaceStore>,
        publisher: Arc<dyn Publisher<Place>>,
        deadline: Duration,
    ) -> Self {
        Self {
            store,
            publisher,
            deadline,
        }
    }

    /// Registers a place, then announces it on the place-added topic.
    ///
    /// The announcement is awaited. If it fails the error is returned even
    /// though the place has already been stored.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] if the insert fails,
    /// [`PlaceError::Publish`] if the announcement fails, or
    /// [`PlaceError::Cancelled`] if either step exceeds the deadline.
    pub async fn add(&self, new_place: NewPlace) -> Result<Place, PlaceError> {
        let place = self.bounded("create", self.store.create(&new_place)).await?;

        match self.bounded("publish", self.publisher.publish(&place)).await {
            Ok(message_id) => {
                tracing::info!(id = %place.id, message_id, topic = self.publisher.topic(), "place added");
                Ok(place)
            }
            Err(e) => {
                tracing::warn!(id = %place.id, error = %e, "place stored but not announced");
                Err(e)
            }
        }
    }

    /// Loads a place by id.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::NotFound`] if the place does not exist,
    /// [`PlaceError::Storage`] on read failure, or
    /// [`PlaceError::Cancelled`] past the deadline.
    pub async fn get(&self, id: PlaceId) -> Result<Place, PlaceError> {
        self.bounded("find", self.store.find_by_id(id)).await
    }

    /// Removes a place. Removing a place that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] if the delete fails, or
    /// [`PlaceError::Cancelled`] past the deadline.
    pub async fn delete(&self, id: PlaceId) -> Result<(), PlaceError> {
        self.bounded("delete", self.store.delete_by_id(id)).await?;
        tracing::info!(%id, "place deleted");
        Ok(())
    }

    /// Lists places, optionally one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] on read failure, or
    /// [`PlaceError::Cancelled`] past the deadline.
    pub async fn list(&self, page: Option<PageRequest>) -> Result<Vec<Place>, PlaceError> {
        self.bounded("list", self.store.find_all(page)).await
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, PlaceError>>,
    ) -> Result<T, PlaceError> {
        tokio::time::timeout(self.deadline, fut)
            .await
            .map_err(|_| PlaceError::Cancelled { operation })?
    }
}
