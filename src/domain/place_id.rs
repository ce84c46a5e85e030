//! Type-safe place identifier.
//!
//! [`PlaceId`] is a newtype wrapper around the `BIGSERIAL` key the store
//! assigns, so that place identifiers cannot be confused with product or
//! message ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier of a registered place.
///
/// Assigned by the store on creation. The zero value means "not yet
/// assigned" and is never handed out by a store.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PlaceId(i64);

impl PlaceId {
    /// The "not yet assigned" identifier.
    pub const UNASSIGNED: Self = Self(0);

    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` when no identifier has been assigned yet.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

/// Serde `skip_serializing_if` helper for raw `_id` fields: zero means
/// "not yet assigned" and is left out of JSON, as for [`PlaceId`].
#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn unassigned(id: &i64) -> bool {
    *id == PlaceId::UNASSIGNED.0
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PlaceId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<PlaceId> for i64 {
    fn from(id: PlaceId) -> Self {
        id.0
    }
}
