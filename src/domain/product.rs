//! Items sold at a place.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PlaceId;
use super::place_id::unassigned;
use crate::error::PlaceError;

/// Upper bound of impact and taste ratings.
pub const MAX_RATING: f32 = 5.0;

/// An item sold at a place.
///
/// Many products reference one place through `place`. Deleting the place
/// removes its products (`ON DELETE CASCADE` in the schema).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Product identifier, omitted while unassigned.
    #[serde(rename = "_id", default, skip_serializing_if = "unassigned")]
    pub id: i64,
    /// Place selling this product.
    pub place: PlaceId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price, never negative.
    pub price: f64,
    /// Image URLs in display order.
    pub images: Vec<String>,
    /// Category labels.
    pub categories: Vec<String>,
    /// Environmental impact score in `0..=5`.
    pub impact_rating: f32,
    /// Taste score in `0..=5`.
    pub taste_rating: f32,
    /// Link to the impact assessment.
    pub impact_url: String,
}

impl Product {
    /// Checks price and rating bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Validation`] for a negative or non-finite
    /// price, or a rating outside `0..=5`.
    pub fn validate(&self) -> Result<(), PlaceError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(PlaceError::Validation(format!(
                "price of {:?} must be a non-negative number",
                self.name
            )));
        }
        for (field, rating) in [
            ("impact_rating", self.impact_rating),
            ("taste_rating", self.taste_rating),
        ] {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(PlaceError::Validation(format!(
                    "{field} must be between 0 and {MAX_RATING}, got {rating}"
                )));
            }
        }
        Ok(())
    }
}
