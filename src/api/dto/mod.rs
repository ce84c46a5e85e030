//! Data Transfer Objects for REST request/response serialization.

pub mod place_dto;

pub use place_dto::*;
