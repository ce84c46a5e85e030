//! Durable log of published topic messages.

use async_trait::async_trait;
use sqlx::PgPool;

use super::MessageLog;
use super::models::StoredMessage;
use crate::error::PlaceError;

/// Append-only `topic_messages` table backed by `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresMessageLog {
    pool: PgPool,
}

impl PostgresMessageLog {
    /// Creates a message log over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Deletes messages older than the given number of days.
    ///
    /// # Errors
    ///
    /// Returns a [`PlaceError::Validation`] if `days` cannot be turned into
    /// a timestamp, or a [`PlaceError::Storage`] on database failure.
    pub async fn delete_older_than(&self, days: u64) -> Result<u64, PlaceError> {
        let cutoff = i64::try_from(days)
            .ok()
            .and_then(chrono::Duration::try_days)
            .and_then(|age| chrono::Utc::now().checked_sub_signed(age))
            .ok_or_else(|| PlaceError::Validation(format!("retention of {days} days is out of range")))?;

        let result = sqlx::query("DELETE FROM topic_messages WHERE published_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl MessageLog for PostgresMessageLog {
    async fn append(&self, topic: &str, payload: &serde_json::Value) -> Result<i64, PlaceError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO topic_messages (topic, payload) VALUES ($1, $2) RETURNING id",
        )
        .bind(topic)
        .bind(payload)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn load_after(&self, topic: &str, after: i64) -> Result<Vec<StoredMessage>, PlaceError> {
        let rows = sqlx::query_as::<_, StoredMessage>(
            "SELECT id, topic, payload, published_at FROM topic_messages \
             WHERE topic = $1 AND id > $2 ORDER BY id ASC",
        )
        .bind(topic)
        .bind(after)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
