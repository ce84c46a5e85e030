//! PostgreSQL implementation of the place store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::models::PlaceRow;
use super::{PageRequest, PlaceStore};
use crate::config::ServiceConfig;
use crate::domain::{NewPlace, Place, PlaceId};
use crate::error::PlaceError;

/// Opens a connection pool sized from the configuration.
///
/// # Errors
///
/// Returns [`PlaceError::Storage`] if the database is unreachable.
pub async fn connect(config: &ServiceConfig) -> Result<PgPool, PlaceError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`.
///
/// # Errors
///
/// Returns [`PlaceError::Storage`] if a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<(), PlaceError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| PlaceError::Storage(e.to_string()))
}

/// PostgreSQL-backed place store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPlaceStore {
    pool: PgPool,
}

impl PostgresPlaceStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceStore for PostgresPlaceStore {
    async fn create(&self, new_place: &NewPlace) -> Result<Place, PlaceError> {
        let row = sqlx::query_as::<_, PlaceRow>(
            "INSERT INTO places (name, address) VALUES ($1, $2) RETURNING id, name, address",
        )
        .bind(&new_place.name)
        .bind(&new_place.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: PlaceId) -> Result<Place, PlaceError> {
        sqlx::query_as::<_, PlaceRow>("SELECT id, name, address FROM places WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?
            .map(Place::from)
            .ok_or(PlaceError::NotFound(id))
    }

    async fn delete_by_id(&self, id: PlaceId) -> Result<(), PlaceError> {
        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        tracing::debug!(%id, rows = result.rows_affected(), "place delete executed");
        Ok(())
    }

    async fn find_all(&self, page: Option<PageRequest>) -> Result<Vec<Place>, PlaceError> {
        let rows = match page {
            None => {
                sqlx::query_as::<_, PlaceRow>("SELECT id, name, address FROM places")
                    .fetch_all(&self.pool)
                    .await?
            }
            Some(p) => {
                sqlx::query_as::<_, PlaceRow>(
                    "SELECT id, name, address FROM places ORDER BY id LIMIT $1 OFFSET $2",
                )
                .bind(i64::from(p.limit))
                .bind(i64::from(p.offset))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Place::from).collect())
    }
}
