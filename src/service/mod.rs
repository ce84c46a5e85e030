//! Service layer: business logic orchestration.
//!
//! [`PlaceService`] runs the place operations against a
//! [`crate::persistence::PlaceStore`] and announces new places through a
//! [`crate::domain::Publisher`].

pub mod place_service;

pub use place_service::PlaceService;
