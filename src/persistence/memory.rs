//! In-memory place store and message log.
//!
//! Keeps places in a `BTreeMap` and messages in a `Vec`, each behind a
//! [`tokio::sync::RwLock`], with ids drawn the way a `BIGSERIAL` column
//! would hand them out.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::StoredMessage;
use super::{MessageLog, PageRequest, PlaceStore};
use crate::domain::{NewPlace, Place, PlaceId};
use crate::error::PlaceError;

/// Place store held entirely in process memory.
#[derive(Debug)]
pub struct InMemoryPlaceStore {
    places: RwLock<BTreeMap<PlaceId, Place>>,
    next_id: AtomicI64,
}

impl InMemoryPlaceStore {
    /// Creates an empty store. The first id handed out is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            places: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Returns the number of stored places.
    pub async fn len(&self) -> usize {
        self.places.read().await.len()
    }

    /// Returns `true` if the store holds no places.
    pub async fn is_empty(&self) -> bool {
        self.places.read().await.is_empty()
    }
}

impl Default for InMemoryPlaceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaceStore for InMemoryPlaceStore {
    async fn create(&self, new_place: &NewPlace) -> Result<Place, PlaceError> {
        let id = PlaceId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let place = Place {
            id,
            ..Place::unsaved(new_place.clone())
        };
        self.places.write().await.insert(id, place.clone());
        Ok(place)
    }

    async fn find_by_id(&self, id: PlaceId) -> Result<Place, PlaceError> {
        self.places
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(PlaceError::NotFound(id))
    }

    async fn delete_by_id(&self, id: PlaceId) -> Result<(), PlaceError> {
        self.places.write().await.remove(&id);
        Ok(())
    }

    async fn find_all(&self, page: Option<PageRequest>) -> Result<Vec<Place>, PlaceError> {
        let map = self.places.read().await;
        let places = match page {
            None => map.values().cloned().collect(),
            Some(p) => map
                .values()
                .skip(p.offset as usize)
                .take(p.limit as usize)
                .cloned()
                .collect(),
        };
        Ok(places)
    }
}

/// Message log held in process memory. Lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryMessageLog {
    messages: RwLock<Vec<StoredMessage>>,
}

impl InMemoryMessageLog {
    /// Creates an empty log. The first id handed out is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageLog for InMemoryMessageLog {
    async fn append(&self, topic: &str, payload: &serde_json::Value) -> Result<i64, PlaceError> {
        let mut messages = self.messages.write().await;
        let id = messages.last().map_or(1, |m| m.id + 1);
        messages.push(StoredMessage {
            id,
            topic: topic.to_string(),
            payload: payload.clone(),
            published_at: chrono::Utc::now(),
        });
        Ok(id)
    }

    async fn load_after(&self, topic: &str, after: i64) -> Result<Vec<StoredMessage>, PlaceError> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.topic == topic && m.id > after)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn seeded(n: usize) -> InMemoryPlaceStore {
        let store = InMemoryPlaceStore::new();
        for i in 0..n {
            let _ = store
                .create(&NewPlace::new(format!("place-{i}"), format!("{i} Main St")))
                .await;
        }
        store
    }

    #[tokio::test]
    async fn create_assigns_distinct_non_zero_ids() {
        let store = InMemoryPlaceStore::new();
        let (Ok(a), Ok(b)) = (
            store.create(&NewPlace::new("a", "x")).await,
            store.create(&NewPlace::new("b", "y")).await,
        ) else {
            panic!("create failed");
        };
        assert!(!a.id.is_unassigned());
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn find_missing_is_not_found() {
        let store = InMemoryPlaceStore::new();
        let result = store.find_by_id(PlaceId::new(99)).await;
        assert!(matches!(result, Err(PlaceError::NotFound(id)) if id == PlaceId::new(99)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = seeded(1).await;
        let id = PlaceId::new(1);
        tokio_test::assert_ok!(store.delete_by_id(id).await);
        tokio_test::assert_ok!(store.delete_by_id(id).await);
        assert!(store.is_empty().await);
        tokio_test::assert_err!(store.find_by_id(id).await);
    }

    #[tokio::test]
    async fn find_all_on_empty_store_is_empty() {
        let store = InMemoryPlaceStore::new();
        let Ok(all) = store.find_all(None).await else {
            panic!("find_all failed");
        };
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn find_all_pages_by_id() {
        let store = seeded(5).await;
        let Ok(page) = store
            .find_all(Some(PageRequest {
                limit: 2,
                offset: 1,
            }))
            .await
        else {
            panic!("find_all failed");
        };
        let ids: Vec<i64> = page.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let store = seeded(2).await;
        let Ok(page) = store
            .find_all(Some(PageRequest {
                limit: 10,
                offset: 5,
            }))
            .await
        else {
            panic!("find_all failed");
        };
        assert!(page.is_empty());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn message_log_loads_after_the_given_id_per_topic() {
        let log = InMemoryMessageLog::new();
        let payload = serde_json::json!({ "name": "Cafe Roma" });
        let (Ok(a), Ok(_), Ok(c)) = (
            log.append("place-added", &payload).await,
            log.append("other", &payload).await,
            log.append("place-added", &payload).await,
        ) else {
            panic!("append failed");
        };
        assert!(c > a);

        let Ok(all) = log.load_after("place-added", 0).await else {
            panic!("load failed");
        };
        let ids: Vec<i64> = all.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a, c]);

        let Ok(rest) = log.load_after("place-added", a).await else {
            panic!("load failed");
        };
        assert_eq!(rest.len(), 1);
        assert_eq!(rest.first().map(|m| m.id), Some(c));
    }
}
