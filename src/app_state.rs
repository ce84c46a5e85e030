//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::domain::{PLACE_ADDED_TOPIC, Place, Topic};
use crate::error::PlaceError;
use crate::persistence::{
    InMemoryMessageLog, InMemoryPlaceStore, PlaceStore, PostgresMessageLog, PostgresPlaceStore,
    postgres,
};
use crate::service::PlaceService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Place service for all business logic.
    pub place_service: Arc<PlaceService>,
    /// Place-added topic for WebSocket subscriptions.
    pub place_added: Topic<Place>,
}

impl AppState {
    /// Wires a service that stores places in `store` and announces them on
    /// `place_added`.
    #[must_use]
    pub fn new(store: Arc<dyn PlaceStore>, place_added: Topic<Place>, config: &ServiceConfig) -> Self {
        let publisher = Arc::new(place_added.clone());
        let place_service = Arc::new(PlaceService::new(
            store,
            publisher,
            config.operation_timeout,
        ));
        Self {
            place_service,
            place_added,
        }
    }

    /// Builds state backed by process memory only. Published messages are
    /// kept in memory for replay when the event log is enabled.
    #[must_use]
    pub fn in_memory(config: &ServiceConfig) -> Self {
        let place_added = if config.event_log_enabled {
            Topic::with_log(
                PLACE_ADDED_TOPIC,
                config.topic_capacity,
                Arc::new(InMemoryMessageLog::new()),
            )
        } else {
            Topic::new(PLACE_ADDED_TOPIC, config.topic_capacity)
        };
        Self::new(Arc::new(InMemoryPlaceStore::new()), place_added, config)
    }

    /// Builds state from configuration, connecting to PostgreSQL and
    /// applying migrations when persistence is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Storage`] if the database cannot be reached or
    /// migrated.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self, PlaceError> {
        if !config.persistence_enabled {
            tracing::warn!("persistence disabled, places are kept in memory");
            return Ok(Self::in_memory(config));
        }

        let pool = postgres::connect(config).await?;
        postgres::migrate(&pool).await?;
        tracing::info!("database migrations applied");

        let place_added = if config.event_log_enabled {
            let log = PostgresMessageLog::new(pool.clone());
            if config.message_retention_days > 0 {
                let removed = log.delete_older_than(config.message_retention_days).await?;
                tracing::info!(removed, days = config.message_retention_days, "expired topic messages removed");
            }
            Topic::with_log(PLACE_ADDED_TOPIC, config.topic_capacity, Arc::new(log))
        } else {
            Topic::new(PLACE_ADDED_TOPIC, config.topic_capacity)
        };

        Ok(Self::new(
            Arc::new(PostgresPlaceStore::new(pool)),
            place_added,
            config,
        ))
    }
}
