//! Database row models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Place, PlaceId};

/// A row of the `places` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlaceRow {
    /// `BIGSERIAL` primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-text address.
    pub address: String,
}

impl From<PlaceRow> for Place {
    fn from(row: PlaceRow) -> Self {
        Self {
            id: PlaceId::new(row.id),
            address: row.address,
            name: row.name,
        }
    }
}

/// A stored message row from the `topic_messages` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredMessage {
    /// Auto-increment row ID, used as the message id.
    pub id: i64,
    /// Topic the message was published to.
    pub topic: String,
    /// JSONB payload.
    pub payload: serde_json::Value,
    /// Server-side append timestamp.
    pub published_at: DateTime<Utc>,
}
