//! The registered place and its creation input.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PlaceId;

/// A registered physical location.
///
/// The id is omitted from JSON while unassigned, so a place that has not
/// been stored yet serializes as `{"address": ..., "name": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Place {
    /// Store-generated identifier.
    #[serde(default, skip_serializing_if = "PlaceId::is_unassigned")]
    pub id: PlaceId,
    /// Free-text street address.
    pub address: String,
    /// Display name.
    pub name: String,
}

impl Place {
    /// Builds an unsaved place from its creation input.
    #[must_use]
    pub fn unsaved(new_place: NewPlace) -> Self {
        Self {
            id: PlaceId::UNASSIGNED,
            address: new_place.address,
            name: new_place.name,
        }
    }
}

/// Fields supplied when registering a place.
///
/// Empty strings are accepted; only presence is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewPlace {
    /// Display name.
    pub name: String,
    /// Free-text street address.
    pub address: String,
}

impl NewPlace {
    /// Creates a new creation input.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}
