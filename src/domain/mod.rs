//! Domain layer: places, their products and addresses, and topics.
//!
//! This module contains the data model served by the API and the typed
//! pub/sub topic used to announce newly created places.

pub mod address;
pub mod menu;
pub mod place;
pub mod place_id;
pub mod product;
pub mod topic;

pub use address::Address;
pub use menu::Menu;
pub use place::{NewPlace, Place};
pub use place_id::PlaceId;
pub use product::Product;
pub use topic::{Delivery, MessageId, PLACE_ADDED_TOPIC, Publisher, Topic};
