//! Place handlers: add, list, get, delete.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ListParams, PlaceListResponse};
use crate::app_state::AppState;
use crate::domain::{NewPlace, Place, PlaceId};
use crate::error::{ErrorResponse, PlaceError};

/// `POST /place` — Register a place and announce it on `place-added`.
///
/// # Errors
///
/// Returns [`PlaceError`] on a malformed body, a storage failure, or a
/// publish failure. A publish failure is reported even though the place
/// was stored.
#[utoipa::path(
    post,
    path = "/place",
    tag = "Places",
    summary = "Add a place",
    description = "Stores the place, then publishes it to the `place-added` topic. If publishing fails the request fails, although the place remains stored.",
    request_body = NewPlace,
    responses(
        (status = 201, description = "Place created", body = Place),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
        (status = 502, description = "Publish failure", body = ErrorResponse),
        (status = 504, description = "Deadline exceeded", body = ErrorResponse),
    )
)]
pub async fn add_place(
    State(state): State<AppState>,
    body: Result<Json<NewPlace>, JsonRejection>,
) -> Result<impl IntoResponse, PlaceError> {
    let Json(new_place) = body?;
    let place = state.place_service.add(new_place).await?;
    Ok((StatusCode::CREATED, Json(place)))
}

/// `GET /place` — List places.
///
/// # Errors
///
/// Returns [`PlaceError`] on invalid paging parameters or storage failure.
#[utoipa::path(
    get,
    path = "/place",
    tag = "Places",
    summary = "List places",
    description = "Returns every place in no particular order. With `limit` or `offset`, returns one page ordered by id.",
    params(ListParams),
    responses(
        (status = 200, description = "Places", body = PlaceListResponse),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_places(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, PlaceError> {
    let Query(params) = params?;
    let places = state.place_service.list(params.page()).await?;
    Ok(Json(PlaceListResponse { places }))
}

/// `GET /place/{placeID}` — Get a place.
///
/// # Errors
///
/// Returns [`PlaceError::NotFound`] if the place does not exist.
#[utoipa::path(
    get,
    path = "/place/{placeID}",
    tag = "Places",
    summary = "Get a place",
    params(
        ("placeID" = i64, Path, description = "Place id"),
    ),
    responses(
        (status = 200, description = "Place", body = Place),
        (status = 404, description = "Place not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn get_place(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, PlaceError> {
    let Path(id) = id?;
    let place = state.place_service.get(PlaceId::new(id)).await?;
    Ok(Json(place))
}

/// `DELETE /place/{placeID}` — Remove a place.
///
/// # Errors
///
/// Returns [`PlaceError`] on storage failure. Deleting an unknown place
/// succeeds.
#[utoipa::path(
    delete,
    path = "/place/{placeID}",
    tag = "Places",
    summary = "Delete a place",
    description = "Removes the place and, through the schema, its products. Idempotent.",
    params(
        ("placeID" = i64, Path, description = "Place id"),
    ),
    responses(
        (status = 204, description = "Place deleted or already absent"),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn delete_place(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, PlaceError> {
    let Path(id) = id?;
    state.place_service.delete(PlaceId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Place routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/place", post(add_place).get(list_places))
        .route("/place/{placeID}", get(get_place).delete(delete_place))
}
