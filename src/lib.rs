//! # place-service
//!
//! REST service for registering places (restaurants, shops) and announcing
//! each new place on the `place-added` topic.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Subscriber Stream (ws/)
//!     │
//!     ├── PlaceService (service/)
//!     ├── Topic<Place> "place-added" (domain/)
//!     │
//!     └── PlaceStore: PostgreSQL or in-memory (persistence/)
//! ```
//!
//! Adding a place stores it first and publishes it second. A failed
//! publish fails the request; the stored row is kept.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
