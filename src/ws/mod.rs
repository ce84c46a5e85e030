//! WebSocket layer: streams `place-added` deliveries to subscribers.
//!
//! The endpoint at `/ws` replays logged messages after the id given in
//! `?after=` and then forwards live deliveries. A subscriber that falls
//! behind is caught up from the log. Subscribers can see a message more
//! than once and must tolerate duplicates.

pub mod connection;
pub mod handler;
pub mod messages;
