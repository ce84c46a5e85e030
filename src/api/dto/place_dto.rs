//! Place DTOs for the list endpoint.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Place;
use crate::persistence::PageRequest;

/// Largest page the list endpoint hands out.
pub const MAX_PAGE_SIZE: u32 = 1_000;

/// Default page size when only `offset` is given.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Optional paging query parameters for `GET /place`.
///
/// Without either parameter the full table is returned.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Maximum number of places (1–1000).
    pub limit: Option<u32>,
    /// Number of places to skip, in id order.
    pub offset: Option<u32>,
}

impl ListParams {
    /// Converts the query into a store page, clamping `limit`.
    #[must_use]
    pub fn page(&self) -> Option<PageRequest> {
        if self.limit.is_none() && self.offset.is_none() {
            return None;
        }
        Some(PageRequest {
            limit: self
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Response body for `GET /place`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceListResponse {
    /// Registered places.
    #[serde(rename = "place")]
    pub places: Vec<Place>,
}
