//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::PlaceListResponse;
use super::handlers::{place, system};
use crate::domain::{Address, Menu, NewPlace, Place, PlaceId, Product};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description, served at `/api-docs/openapi.json` when
/// the `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "place-service", description = "Places, their menus, and place-added events"),
    paths(
        place::add_place,
        place::list_places,
        place::get_place,
        place::delete_place,
        system::health_handler,
    ),
    components(schemas(
        Place,
        PlaceId,
        NewPlace,
        Address,
        Product,
        Menu,
        PlaceListResponse,
        ErrorResponse,
        ErrorBody,
        system::HealthResponse,
    )),
    tags(
        (name = "Places", description = "Place registration"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
