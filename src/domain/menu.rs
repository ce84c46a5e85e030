//! Menu: a place together with the products it sells.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::place_id::unassigned;
use super::{Place, Product};

/// Aggregate view of a place and its products. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Menu {
    /// Menu identifier, omitted while unassigned.
    #[serde(rename = "_id", default, skip_serializing_if = "unassigned")]
    pub id: i64,
    /// The place the menu belongs to.
    pub place: Place,
    /// Products in display order.
    pub products: Vec<Product>,
}

impl Menu {
    /// Builds a menu for `place`, keeping only products that reference it.
    ///
    /// Input order is preserved.
    #[must_use]
    pub fn assemble(place: Place, products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .filter(|p| p.place == place.id)
            .collect();
        Self {
            id: 0,
            place,
            products,
        }
    }
}
